use serde::Serialize;

use super::error::DomainError;

pub const MIN_REPEAT: u8 = 1;
pub const MAX_REPEAT: u8 = 100;

/// Validated options of the `echo` example command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoOptions {
    name: String,
    uppercase: bool,
    repeat: u8,
}

impl EchoOptions {
    /// Validate already-typed options.
    pub fn new(name: impl Into<String>, uppercase: bool, repeat: i64) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyEchoName);
        }

        let repeat = u8::try_from(repeat)
            .ok()
            .filter(|r| (MIN_REPEAT..=MAX_REPEAT).contains(r))
            .ok_or(DomainError::RepeatOutOfRange { value: repeat })?;

        Ok(Self {
            name,
            uppercase,
            repeat,
        })
    }

    /// Validate options as they arrive from the command line, where the
    /// repeat count is still a raw string.
    pub fn parse(name: impl Into<String>, uppercase: bool, repeat: &str) -> Result<Self, DomainError> {
        let count = repeat
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::InvalidRepeat {
                value: repeat.into(),
            })?;
        Self::new(name, uppercase, count)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uppercase(&self) -> bool {
        self.uppercase
    }

    pub fn repeat(&self) -> u8 {
        self.repeat
    }

    /// The line the command emits, once per repeat.
    pub fn greeting(&self) -> String {
        let greeting = format!("Hello, {}!", self.name);
        if self.uppercase {
            greeting.to_uppercase()
        } else {
            greeting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_greeting() {
        let opts = EchoOptions::new("Ada", true, 3).unwrap();
        assert_eq!(opts.greeting(), "HELLO, ADA!");
        assert_eq!(opts.repeat(), 3);
    }

    #[test]
    fn plain_greeting() {
        let opts = EchoOptions::parse("Ada", false, "1").unwrap();
        assert_eq!(opts.greeting(), "Hello, Ada!");
    }

    #[test]
    fn repeat_bounds() {
        assert!(EchoOptions::new("Ada", false, 1).is_ok());
        assert!(EchoOptions::new("Ada", false, 100).is_ok());
        assert_eq!(
            EchoOptions::parse("Ada", false, "0"),
            Err(DomainError::RepeatOutOfRange { value: 0 })
        );
        assert_eq!(
            EchoOptions::parse("Ada", false, "101"),
            Err(DomainError::RepeatOutOfRange { value: 101 })
        );
        assert!(EchoOptions::new("Ada", false, -1).is_err());
    }

    #[test]
    fn non_numeric_repeat_is_rejected() {
        assert!(matches!(
            EchoOptions::parse("Ada", false, "many"),
            Err(DomainError::InvalidRepeat { .. })
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            EchoOptions::new("", false, 1),
            Err(DomainError::EmptyEchoName)
        );
    }
}
