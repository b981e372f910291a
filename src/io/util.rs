use crate::model::types::Element;

/// Infers the element of an ATOM/HETATM record.
///
/// The element columns (77-78) win when they parse. MD-generated files often
/// leave them blank, so the atom name is the fallback: its alphabetic prefix
/// is tried as a symbol, except that names starting with `H` are always
/// hydrogen ("HO1", "HW2" and friends would otherwise parse as holmium or
/// tungsten compounds).
pub fn infer_element(element_field: &str, atom_name: &str) -> Option<Element> {
    if let Ok(element) = element_field.parse::<Element>() {
        return Some(element);
    }

    let prefix: String = atom_name
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if prefix.is_empty() {
        return None;
    }
    if prefix.starts_with(['H', 'h']) {
        return "H".parse().ok();
    }

    prefix
        .parse::<Element>()
        .or_else(|_| prefix[..1].parse::<Element>())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_column_wins() {
        assert_eq!(infer_element("Cl", "XX99").unwrap().symbol(), "Cl");
        assert_eq!(infer_element(" O", "CL1").unwrap().symbol(), "O");
    }

    #[test]
    fn falls_back_to_atom_name_prefix() {
        assert_eq!(infer_element("", "CL1").unwrap().symbol(), "Cl");
        assert_eq!(infer_element("", "O00").unwrap().symbol(), "O");
        assert_eq!(infer_element("", "NA").unwrap().symbol(), "Na");
    }

    #[test]
    fn hydrogen_names_never_parse_as_metals() {
        assert_eq!(infer_element("", "HO1").unwrap().symbol(), "H");
        assert_eq!(infer_element("", "HW2").unwrap().symbol(), "H");
    }

    #[test]
    fn single_letter_fallback_when_two_letter_invalid() {
        // "OW" is not a symbol; "O" is.
        assert_eq!(infer_element("", "OW").unwrap().symbol(), "O");
    }

    #[test]
    fn unresolvable_names_yield_none() {
        assert!(infer_element("", "123").is_none());
        assert!(infer_element("", "").is_none());
    }
}
