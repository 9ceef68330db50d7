use shared_types::{has_value, Contact, MergeField, MergeFieldUpdate};

/// Back-fill values for fields the target is missing.
///
/// Sources are scanned in order and the first non-blank value wins. Fields
/// already populated on the target never appear in the result. `sources`
/// must not contain the target.
pub fn build_merge_field_updates(target: &Contact, sources: &[Contact]) -> MergeFieldUpdate {
    let mut update = MergeFieldUpdate::default();

    for field in MergeField::ALL {
        if has_value(field.value(target)) {
            continue;
        }

        let filler = sources
            .iter()
            .map(|source| field.value(source))
            .find(|value| has_value(value))
            .and_then(|value| value.clone());

        if let Some(value) = filler {
            update.fields.insert(field, value);
        }
    }

    update
}
