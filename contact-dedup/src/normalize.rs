use shared_types::Contact;

/// Lowercased, trimmed name component.
pub fn normalize_name_part(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `first last`, each part normalized. Two blank parts yield a single space.
pub fn full_name_key(first_name: &str, last_name: &str) -> String {
    format!(
        "{} {}",
        normalize_name_part(first_name),
        normalize_name_part(last_name)
    )
}

pub fn normalize_email(email: Option<&str>) -> Option<String> {
    let normalized = email?.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Digits only. `(612) 555-1234` and `612.555.1234` both become `6125551234`.
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    let digits: String = phone?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Precomputed matching keys for one contact.
#[derive(Debug, Clone)]
pub struct NormalizedContact {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Option<String>,
    /// Primary and alternate phone digits, without repeats.
    pub phones: Vec<String>,
}

impl NormalizedContact {
    pub fn from_contact(contact: &Contact) -> Self {
        let first_name = normalize_name_part(&contact.first_name);
        let last_name = normalize_name_part(&contact.last_name);
        let full_name = full_name_key(&contact.first_name, &contact.last_name);

        let mut phones = Vec::with_capacity(2);
        for phone in [contact.phone.as_deref(), contact.alt_phone.as_deref()] {
            if let Some(digits) = normalize_phone(phone) {
                if !phones.contains(&digits) {
                    phones.push(digits);
                }
            }
        }

        Self {
            first_name,
            last_name,
            full_name,
            email: normalize_email(contact.email.as_deref()),
            phones,
        }
    }
}

/// True when the first names match or the last names match, ignoring blanks.
pub fn shares_name_part(a: &NormalizedContact, b: &NormalizedContact) -> bool {
    (!a.first_name.is_empty() && a.first_name == b.first_name)
        || (!a.last_name.is_empty() && a.last_name == b.last_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_key_trims_and_lowercases() {
        assert_eq!(full_name_key("  John ", "DOE"), "john doe");
        assert_eq!(full_name_key("", ""), " ");
    }

    #[test]
    fn test_normalized_contact_uses_full_name_key() {
        let normalized = NormalizedContact::from_contact(&Contact::named(1, "  John ", "DOE"));
        assert_eq!(normalized.full_name, "john doe");
        assert_eq!(normalized.full_name, full_name_key("  John ", "DOE"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email(Some(" JD@Example.COM ")),
            Some("jd@example.com".to_string())
        );
        assert_eq!(normalize_email(Some("   ")), None);
        assert_eq!(normalize_email(None), None);
    }

    #[test]
    fn test_normalize_phone_strips_formatting() {
        assert_eq!(
            normalize_phone(Some("(612) 555-1234")),
            Some("6125551234".to_string())
        );
        assert_eq!(
            normalize_phone(Some("+1 612.555.1234")),
            Some("16125551234".to_string())
        );
        assert_eq!(normalize_phone(Some("ext. -")), None);
        assert_eq!(normalize_phone(None), None);
    }

    #[test]
    fn test_phones_collect_primary_and_alternate() {
        let mut contact = Contact::named(1, "Alice", "Smith");
        contact.phone = Some("612-555-1234".to_string());
        contact.alt_phone = Some("(651) 555-0000".to_string());

        let normalized = NormalizedContact::from_contact(&contact);
        assert_eq!(normalized.phones, vec!["6125551234", "6515550000"]);
    }

    #[test]
    fn test_same_primary_and_alternate_counted_once() {
        let mut contact = Contact::named(1, "Alice", "Smith");
        contact.phone = Some("612-555-1234".to_string());
        contact.alt_phone = Some("6125551234".to_string());

        let normalized = NormalizedContact::from_contact(&contact);
        assert_eq!(normalized.phones, vec!["6125551234"]);
    }

    #[test]
    fn test_shares_name_part() {
        let john_doe = NormalizedContact::from_contact(&Contact::named(1, "John", "Doe"));
        let jane_doe = NormalizedContact::from_contact(&Contact::named(2, "Jane", "DOE"));
        let john_roe = NormalizedContact::from_contact(&Contact::named(3, "john", "Roe"));
        let mary_major = NormalizedContact::from_contact(&Contact::named(4, "Mary", "Major"));

        assert!(shares_name_part(&john_doe, &jane_doe));
        assert!(shares_name_part(&john_doe, &john_roe));
        assert!(!shares_name_part(&john_doe, &mary_major));
    }

    #[test]
    fn test_blank_name_parts_never_match() {
        let a = NormalizedContact::from_contact(&Contact::named(1, "", "Doe"));
        let b = NormalizedContact::from_contact(&Contact::named(2, " ", "Roe"));
        assert!(!shares_name_part(&a, &b));
    }
}
