use strum_macros::{AsRefStr, EnumIter};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Requirements a new password must meet before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum PasswordRule {
    BeAtLeast8Characters,
    IncludeUpperCaseAndLowerCase,
    ContainsNumber,
    ContainsSpecialCharacter,
}

impl PasswordRule {
    pub fn is_met(&self, password: &str) -> bool {
        match self {
            PasswordRule::BeAtLeast8Characters => password.trim().chars().count() >= MIN_PASSWORD_LENGTH,
            PasswordRule::IncludeUpperCaseAndLowerCase => {
                password.chars().any(|c| c.is_ascii_lowercase())
                    && password.chars().any(|c| c.is_ascii_uppercase())
            }
            PasswordRule::ContainsNumber => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::ContainsSpecialCharacter => password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PasswordRule::BeAtLeast8Characters => "Be at least 8 characters",
            PasswordRule::IncludeUpperCaseAndLowerCase => "Include upper and lower case letters",
            PasswordRule::ContainsNumber => "Contain a number",
            PasswordRule::ContainsSpecialCharacter => "Contain a special character",
        }
    }
}

pub fn unmet_rules(password: &str) -> Vec<PasswordRule> {
    use strum::IntoEnumIterator;
    PasswordRule::iter().filter(|rule| !rule.is_met(password)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_meets_every_rule() {
        assert!(unmet_rules("Traffic#2024").is_empty());
    }

    #[test]
    fn weak_password_reports_missing_rules() {
        assert_eq!(
            unmet_rules("abc"),
            vec![
                PasswordRule::BeAtLeast8Characters,
                PasswordRule::IncludeUpperCaseAndLowerCase,
                PasswordRule::ContainsNumber,
                PasswordRule::ContainsSpecialCharacter,
            ]
        );
        assert_eq!(
            unmet_rules("        aB1"),
            vec![PasswordRule::BeAtLeast8Characters]
        );
    }
}
