//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for enums
///
/// Parsing is case-insensitive; unmatched input is handed to the error
/// constructor.
///
/// # Usage
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     MyEnum,
///     SubticketsError::UnknownColumn,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:literal),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::SubticketsError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_variant(s.to_string())),
                }
            }
        }
    };
}

/// Macro to generate only Display implementation for enums
///
/// # Usage
///
/// ```rust,ignore
/// enum_display!(
///     MyEnum,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display {
    (
        $enum_name:ident,
        { $($variant:ident => $str:literal),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => f.write_str($str),)+
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::error::SubticketsError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestEnum {
        A,
        B,
        C,
    }

    enum_display!(TestEnum, { A => "a", B => "b", C => "c" });

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Parsed {
        Left,
        Right,
    }

    enum_display_fromstr!(Parsed, SubticketsError::UnknownColumn, {
        Left => "left",
        Right => "right",
    });

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::A.to_string(), "a");
        assert_eq!(TestEnum::B.to_string(), "b");
        assert_eq!(TestEnum::C.to_string(), "c");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(" LEFT ".parse::<Parsed>().unwrap(), Parsed::Left);
        assert_eq!("right".parse::<Parsed>().unwrap(), Parsed::Right);
        assert_eq!(Parsed::Right.to_string(), "right");
    }

    #[test]
    fn test_fromstr_unknown_uses_error_variant() {
        let err = "middle".parse::<Parsed>().unwrap_err();
        assert!(matches!(err, SubticketsError::UnknownColumn(s) if s == "middle"));
    }
}
