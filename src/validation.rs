//! Registration form validation and CPF handling
//!
//! Pure functions with no I/O. The CPF mask mirrors what the account forms
//! apply while the user types: `000.000.000-00`, built up progressively.

use std::fmt;

/// Strip non-digits and truncate to the 11 digits of a CPF
pub fn parse_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(11).collect()
}

/// Mask a CPF as `000.000.000-00` while it is being typed
///
/// Fewer than 11 digits yield a prefix of the mask, never a trailing
/// separator: a dot appears only once a digit follows it, the dash only once
/// the tenth digit exists.
pub fn format_cpf(raw: &str) -> String {
    let digits = parse_cpf(raw);
    let mut out = String::with_capacity(14);

    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }

    out
}

/// Check a CPF with the standard mod-11 verification digits
///
/// Requires exactly 11 digits after stripping; sequences of one repeated
/// digit pass the arithmetic but are not valid CPFs and are rejected.
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits = parse_cpf(raw);
    if digits.len() != 11 {
        return false;
    }

    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = d[..len]
            .iter()
            .enumerate()
            .map(|(i, &x)| x * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };

    check(9) == d[9] && check(10) == d[10]
}

/// The verdict for a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Whether the field passed
    pub valid: bool,

    /// What was wrong, when it did not
    pub message: Option<String>,
}

impl FieldCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

/// Per-field validation result for the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Verdict for the name field
    pub name: FieldCheck,

    /// Verdict for the email field
    pub email: FieldCheck,

    /// Verdict for the password field
    pub password: FieldCheck,

    /// Verdict for the CPF field; always valid for supplier registration
    pub cpf: FieldCheck,
}

impl ValidationReport {
    /// Whether every field passed
    pub fn is_valid(&self) -> bool {
        self.name.valid && self.email.valid && self.password.valid && self.cpf.valid
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, check) in [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("cpf", &self.cpf),
        ] {
            if let Some(msg) = check.message.as_deref() {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, msg)?;
                first = false;
            }
        }
        if first {
            write!(f, "all fields valid")?;
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
}

/// Validate a registration form field by field
///
/// `cpf` is `Some` for user registration and `None` for suppliers, who do
/// not carry a CPF. Registration must only proceed when
/// [`ValidationReport::is_valid`] holds.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    cpf: Option<&str>,
    min_password_len: usize,
) -> ValidationReport {
    let name_check = if name.trim().is_empty() {
        FieldCheck::fail("name must not be empty")
    } else {
        FieldCheck::ok()
    };

    let email_check = if is_valid_email(email) {
        FieldCheck::ok()
    } else {
        FieldCheck::fail("email address is not valid")
    };

    let password_check = if password.len() < min_password_len {
        FieldCheck::fail("password is too short")
    } else {
        FieldCheck::ok()
    };

    let cpf_check = match cpf {
        Some(value) if is_valid_cpf(value) => FieldCheck::ok(),
        Some(_) => FieldCheck::fail("CPF is not valid"),
        None => FieldCheck::ok(),
    };

    ValidationReport {
        name: name_check,
        email: email_check,
        password: password_check,
        cpf: cpf_check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_mask_full_length() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
    }

    #[test]
    fn cpf_mask_strips_existing_separators() {
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf("529a982b247c25"), "529.982.247-25");
    }

    #[test]
    fn cpf_mask_truncates_extra_digits() {
        assert_eq!(format_cpf("529982247259999"), "529.982.247-25");
    }

    #[test]
    fn cpf_mask_partial_input_has_no_trailing_separator() {
        assert_eq!(format_cpf(""), "");
        assert_eq!(format_cpf("5"), "5");
        assert_eq!(format_cpf("529"), "529");
        assert_eq!(format_cpf("5299"), "529.9");
        assert_eq!(format_cpf("529982"), "529.982");
        assert_eq!(format_cpf("5299822"), "529.982.2");
        assert_eq!(format_cpf("529982247"), "529.982.247");
        assert_eq!(format_cpf("5299822472"), "529.982.247-2");
    }

    #[test]
    fn cpf_parse_round_trips_through_mask() {
        for input in ["52998224725", "529.982.247-25", "52", "", "abc123"] {
            assert_eq!(parse_cpf(&format_cpf(input)), parse_cpf(input));
        }
    }

    #[test]
    fn cpf_check_digits() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("52998224725"));
        assert!(!is_valid_cpf("52998224726"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("1234"));
    }

    #[test]
    fn registration_all_valid() {
        let report = validate_registration(
            "Maria Silva",
            "maria@example.com",
            "hunter22",
            Some("529.982.247-25"),
            6,
        );
        assert!(report.is_valid());
    }

    #[test]
    fn registration_supplier_skips_cpf() {
        let report =
            validate_registration("Acme Energia", "contact@acme.com.br", "hunter22", None, 6);
        assert!(report.is_valid());
        assert!(report.cpf.valid);
    }

    #[test]
    fn registration_flags_each_field() {
        let report = validate_registration("", "not-an-email", "abc", Some("123"), 6);
        assert!(!report.is_valid());
        assert!(!report.name.valid);
        assert!(!report.email.valid);
        assert!(!report.password.valid);
        assert!(!report.cpf.valid);
        let rendered = report.to_string();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("CPF"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn password_minimum_is_configurable() {
        let report = validate_registration("n", "a@b.co", "12345678", None, 10);
        assert!(!report.password.valid);
    }
}
