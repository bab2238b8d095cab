use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DeckResult<T> = Result<T, DeckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckErrorCategory {
    InputValidation,
    InvalidGeometry,
    DensitySanity,
    MixtureInapplicable,
    ZeroDensity,
    ChainBreak,
    IoSystem,
}

impl DeckErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::IoSystem => 3,
            Self::InvalidGeometry => 4,
            Self::DensitySanity => 5,
            Self::MixtureInapplicable => 6,
            Self::ZeroDensity => 7,
            Self::ChainBreak => 8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InputValidation => "InputValidation",
            Self::InvalidGeometry => "InvalidGeometry",
            Self::DensitySanity => "DensitySanity",
            Self::MixtureInapplicable => "MixtureInapplicable",
            Self::ZeroDensity => "ZeroDensity",
            Self::ChainBreak => "ChainBreak",
            Self::IoSystem => "IoSystem",
        }
    }
}

/// Placeholder-coded error shared by every deck-generation and analysis
/// stage. The placeholder is a stable machine-readable code; the message is
/// for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckError {
    category: DeckErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl DeckError {
    pub fn new(
        category: DeckErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::InputValidation, placeholder, message)
    }

    pub fn invalid_geometry(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::InvalidGeometry, placeholder, message)
    }

    pub fn density_sanity(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::DensitySanity, placeholder, message)
    }

    pub fn mixture_inapplicable(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::MixtureInapplicable, placeholder, message)
    }

    pub fn zero_density(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::ZeroDensity, placeholder, message)
    }

    pub fn chain_break(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::ChainBreak, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::IoSystem, placeholder, message)
    }

    pub const fn category(&self) -> DeckErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}

impl Display for DeckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.label(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for DeckError {}
