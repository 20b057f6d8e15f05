//! Modal dialogs drawn over the window.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    NewPlaylist,
    RenamePlaylist(String),
    AddPath,
}

impl InputPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            InputPurpose::NewPlaylist => " new playlist ",
            InputPurpose::RenamePlaylist(_) => " rename playlist ",
            InputPurpose::AddPath => " add file or folder ",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            InputPurpose::NewPlaylist => "Enter playlist name:",
            InputPurpose::RenamePlaylist(_) => "Enter new name:",
            InputPurpose::AddPath => "Enter path to an audio file or directory:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePlaylist(String),
}

impl ConfirmAction {
    pub fn question(&self) -> String {
        match self {
            ConfirmAction::DeletePlaylist(name) => {
                format!("Are you sure you want to delete \"{name}\"? (y/n)")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Popup {
    #[default]
    None,
    /// Any key closes it.
    Error(String),
    Input {
        purpose: InputPurpose,
        buffer: String,
    },
    Confirm(ConfirmAction),
    /// Tag details of the selected track.
    Metadata,
}

impl Popup {
    pub fn is_open(&self) -> bool {
        *self != Popup::None
    }
}
