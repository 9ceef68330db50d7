use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(CreateContactRequest::export_to_string()?));
    types.push(clean_type(ContactsResponse::export_to_string()?));

    // Association types
    types.push(clean_type(Club::export_to_string()?));
    types.push(clean_type(ClubContact::export_to_string()?));
    types.push(clean_type(CommitteeMember::export_to_string()?));
    types.push(clean_type(ContactAssociations::export_to_string()?));

    // Duplicate detection types
    types.push(clean_type(MatchType::export_to_string()?));
    types.push(clean_type(MatchConfidence::export_to_string()?));
    types.push(clean_type(DuplicateGroup::export_to_string()?));
    types.push(clean_type(DuplicateGroupsResponse::export_to_string()?));

    // Merge types
    types.push(clean_type(MergeField::export_to_string()?));
    types.push(clean_type(MergeFieldUpdate::export_to_string()?));
    types.push(clean_type(AssociationDisposition::export_to_string()?));
    types.push(clean_type(ClubDisposition::export_to_string()?));
    types.push(clean_type(CommitteeDisposition::export_to_string()?));
    types.push(clean_type(MergePlan::export_to_string()?));
    types.push(clean_type(MergeContactsRequest::export_to_string()?));
    types.push(clean_type(MergeSummary::export_to_string()?));
    types.push(clean_type(MergeHistoryEntry::export_to_string()?));
    types.push(clean_type(MergeHistoryResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
