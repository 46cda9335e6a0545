use serde::{Deserialize, Serialize};

/// Avatar choices for family members. Unknown keys render as [`ProfileIcon::UserCircle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileIcon {
    #[default]
    UserCircle,
    UserMale,
    UserFemale,
    UserChild,
    UserElderly,
    UserTeen,
    UserBaby,
    UserCouple,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileIconInfo {
    pub id: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

impl ProfileIcon {
    pub fn all() -> &'static [ProfileIcon] {
        &[
            Self::UserCircle,
            Self::UserMale,
            Self::UserFemale,
            Self::UserChild,
            Self::UserElderly,
            Self::UserTeen,
            Self::UserBaby,
            Self::UserCouple,
        ]
    }

    /// Lenient lookup; anything unrecognized maps to the default icon.
    pub fn from_key(key: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|icon| icon.as_str() == key)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCircle => "user-circle",
            Self::UserMale => "user-male",
            Self::UserFemale => "user-female",
            Self::UserChild => "user-child",
            Self::UserElderly => "user-elderly",
            Self::UserTeen => "user-teen",
            Self::UserBaby => "user-baby",
            Self::UserCouple => "user-couple",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::UserCircle => "\u{1F464}",
            Self::UserMale => "\u{1F468}",
            Self::UserFemale => "\u{1F469}",
            Self::UserChild => "\u{1F9D2}",
            Self::UserElderly => "\u{1F474}",
            Self::UserTeen => "\u{1F9D1}",
            Self::UserBaby => "\u{1F476}",
            Self::UserCouple => "\u{1F46B}",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UserCircle => "Default",
            Self::UserMale => "Male",
            Self::UserFemale => "Female",
            Self::UserChild => "Child",
            Self::UserElderly => "Elderly",
            Self::UserTeen => "Teen",
            Self::UserBaby => "Baby",
            Self::UserCouple => "Couple",
        }
    }

    pub fn info(&self) -> ProfileIconInfo {
        ProfileIconInfo {
            id: self.as_str(),
            emoji: self.glyph(),
            label: self.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_round_trips() {
        for icon in ProfileIcon::all() {
            assert_eq!(ProfileIcon::from_key(icon.as_str()), *icon);
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_default_glyph() {
        let icon = ProfileIcon::from_key("user-astronaut");
        assert_eq!(icon, ProfileIcon::UserCircle);
        assert_eq!(icon.glyph(), "👤");
    }

    #[test]
    fn test_serde_uses_kebab_keys() {
        assert_eq!(
            serde_json::to_string(&ProfileIcon::UserElderly).unwrap(),
            r#""user-elderly""#
        );
    }
}
