use std::fmt;

use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoaderSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl LoaderSize {
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Sm => "h-6 w-6",
            Self::Md => "h-10 w-10",
            Self::Lg => "h-16 w-16",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported opacity: {0}%")]
pub struct InvalidOpacity(pub u8);

/// Background opacity of the loader overlay in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opacity(u8);

impl Opacity {
    pub const SUPPORTED: [u8; 7] = [0, 25, 50, 75, 90, 95, 100];
    pub const OPAQUE: Self = Self(100);

    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl TryFrom<u8> for Opacity {
    type Error = InvalidOpacity;
    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        if Self::SUPPORTED.contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(InvalidOpacity(percent))
        }
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A full screen overlay with a spinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    pub size: LoaderSize,
    pub text: Option<String>,
    pub is_loading: bool,
    pub opacity: Opacity,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            size: LoaderSize::default(),
            text: None,
            is_loading: true,
            opacity: Opacity::default(),
        }
    }
}

impl Loader {
    pub const fn is_visible(&self) -> bool {
        self.is_loading
    }

    pub fn background_color(&self) -> String {
        let alpha = f64::from(self.opacity.percent()) / 100.0;
        format!("rgba(0, 0, 0, {alpha})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_supported_opacities_only() {
        for percent in Opacity::SUPPORTED {
            assert_eq!(Opacity::try_from(percent).unwrap().percent(), percent);
        }
        assert_eq!(Opacity::try_from(30), Err(InvalidOpacity(30)));
        assert_eq!(Opacity::try_from(101), Err(InvalidOpacity(101)));
    }

    #[test]
    fn background_color() {
        let loader = Loader {
            opacity: Opacity::try_from(50).unwrap(),
            ..Default::default()
        };
        assert_eq!(loader.background_color(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(Loader::default().background_color(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn hidden_if_not_loading() {
        let loader = Loader {
            is_loading: false,
            ..Default::default()
        };
        assert!(!loader.is_visible());
    }
}
