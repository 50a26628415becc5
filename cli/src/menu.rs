// Main menu commands

/// One entry of the main menu. Selected by typing its number exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    List,
    Create,
    Find,
    Edit,
    Delete,
    SaveAndExit,
    DiscardAndExit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 7] = [
        Self::List,
        Self::Create,
        Self::Find,
        Self::Edit,
        Self::Delete,
        Self::SaveAndExit,
        Self::DiscardAndExit,
    ];

    /// Map a raw input line to a command. Only the literal strings "1".."7" match.
    pub fn parse(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::List),
            "2" => Some(Self::Create),
            "3" => Some(Self::Find),
            "4" => Some(Self::Edit),
            "5" => Some(Self::Delete),
            "6" => Some(Self::SaveAndExit),
            "7" => Some(Self::DiscardAndExit),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::List => "1",
            Self::Create => "2",
            Self::Find => "3",
            Self::Edit => "4",
            Self::Delete => "5",
            Self::SaveAndExit => "6",
            Self::DiscardAndExit => "7",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "Show all contacts",
            Self::Create => "Add contact",
            Self::Find => "Search contacts",
            Self::Edit => "Edit contact",
            Self::Delete => "Delete contact",
            Self::SaveAndExit => "Save and exit",
            Self::DiscardAndExit => "Exit without saving",
        }
    }

    /// Whether choosing this marks the session as changed.
    pub fn marks_changed(self) -> bool {
        matches!(self, Self::Create | Self::Edit | Self::Delete)
    }
}
