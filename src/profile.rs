use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::deed::ImageRef;
use crate::{KarmaError, Result};

pub const DEFAULT_DISPLAY_NAME: &str = "KarmaUser";
pub const DEFAULT_BIO: &str = "Community volunteer passionate about making \
a difference through small, consistent acts of kindness.";

/// Cosmetic theme selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Purple,
}

impl FromStr for Theme {
    type Err = KarmaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "purple" => Ok(Theme::Purple),
            _ => Err(KarmaError::Parse),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Purple => "purple",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Avatar {
    /// One of the bundled avatars, by name.
    Preset(String),
    Uploaded(ImageRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub bio: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_owned(),
            avatar: None,
            theme: Theme::default(),
            bio: DEFAULT_BIO.to_owned(),
        }
    }
}

/// Partial update of a [`Profile`], as produced by an edit form.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub display_name: Option<String>,
    pub avatar: Option<Avatar>,
    pub theme: Option<Theme>,
    pub bio: Option<String>,
}

impl Profile {
    pub fn apply(&mut self, edit: ProfileEdit) {
        if let Some(name) = edit.display_name {
            let name = name.trim();
            if !name.is_empty() {
                self.display_name = name.to_owned();
            }
        }
        if let Some(avatar) = edit.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(theme) = edit.theme {
            self.theme = theme;
        }
        if let Some(bio) = edit.bio {
            self.bio = bio;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_profile_fills_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"displayName":"Ada"}"#).unwrap();
        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.theme, Theme::Light);
        assert_eq!(profile.avatar, None);
        assert!(profile.bio.is_empty());
    }

    #[test]
    fn avatar_is_tagged() {
        let profile = Profile {
            avatar: Some(Avatar::Preset("owl".to_owned())),
            theme: Theme::Purple,
            ..Profile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["avatar"]["kind"], "preset");
        assert_eq!(json["avatar"]["value"], "owl");
        assert_eq!(json["theme"], "purple");
    }

    #[test]
    fn blank_name_edit_is_ignored() {
        let mut profile = Profile::default();
        profile.apply(ProfileEdit {
            display_name: Some("   ".to_owned()),
            theme: Some(Theme::Dark),
            ..ProfileEdit::default()
        });
        assert_eq!(profile.display_name, DEFAULT_DISPLAY_NAME);
        assert_eq!(profile.theme, Theme::Dark);
    }

    #[test]
    fn theme_parsing() {
        assert_eq!("Purple".parse::<Theme>().unwrap(), Theme::Purple);
        assert!("neon".parse::<Theme>().is_err());
    }
}
