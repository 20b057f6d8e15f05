fn main() -> anyhow::Result<()> {
    jukebox::runtime::run()
}
