//! # Content Type Schema Validator
//!
//! Command-line utility that checks content type schema files before they are
//! loaded into a schema store.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/blog_post.json
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Validating schema file: schemas/blog_post.json
//! ✓ Schema is valid!
//!
//! Schema Summary:
//!   Name: blog_post
//!   Display name: Blog Post
//!   Fields: 3
//!   Required fields: title
//!   Field types:
//!     - number: 1
//!     - text: 2
//! ```
//!
//! In directory mode every `*.json` file is checked on its own, then all valid
//! schemas are loaded into one store so that duplicate names across files are
//! caught too.
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or could not be read

use dynamic_content::schema::{
    ContentTypeSchema, InMemorySchemaStore, SchemaStore, check_definition,
};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let program = program_name(&args);

    let Some(target) = args.get(1) else {
        eprintln!("Usage: {} <schema-file-or-directory>", program);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/blog_post.json", program);
        eprintln!("  {} ./schemas/", program);
        process::exit(1);
    };

    let path = Path::new(target);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path).await;
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

/// Name to print in usage text; argv may be empty.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("schema-validator", String::as_str)
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match load_and_check_schema(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

async fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let files = match json_files(dir_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut valid = Vec::new();
    let mut error_count = 0;

    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", file_name);

        match load_and_check_schema(&path) {
            Ok(schema) => {
                println!("  ✓ Valid - {} ({})", schema.display_name, schema.name);
                valid.push(schema);
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid.len());
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    println!("\nTesting schema store loading...");
    let store = InMemorySchemaStore::new();
    let names: Vec<(String, String)> = valid
        .iter()
        .map(|s| (s.name.clone(), s.display_name.clone()))
        .collect();
    match store.bulk_create(valid).await {
        Ok(count) => {
            println!("✓ Schema store loaded successfully");
            println!("  Total schemas loaded: {}", count);
            for (name, display_name) in names {
                println!("    - {} ({})", display_name, name);
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to load schema store: {}", e);
            process::exit(1);
        }
    }
}

fn json_files(dir_path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir_path)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    Ok(files)
}

fn load_and_check_schema(file_path: &Path) -> Result<ContentTypeSchema, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;

    let json_value: serde_json::Value = serde_json::from_str(&content)?;
    let obj = json_value
        .as_object()
        .ok_or("Schema must be a JSON object")?;

    for key in ["name", "display_name"] {
        if !obj.contains_key(key) {
            return Err(format!("Schema missing required '{}' field", key).into());
        }
    }

    let schema: ContentTypeSchema = serde_json::from_value(json_value)?;
    check_definition(&schema)?;

    Ok(schema)
}

fn print_schema_summary(schema: &ContentTypeSchema) {
    println!();
    println!("Schema Summary:");
    println!("  Name: {}", schema.name);
    println!("  Display name: {}", schema.display_name);
    if !schema.description.is_empty() {
        println!("  Description: {}", schema.description);
    }
    if !schema.is_active {
        println!("  Inactive");
    }
    println!("  Fields: {}", schema.fields.len());

    let required: Vec<&str> = schema
        .required_fields()
        .map(|field| field.field_name.as_str())
        .collect();
    if !required.is_empty() {
        println!("  Required fields: {}", required.join(", "));
    }

    let mut type_counts = BTreeMap::new();
    for field in &schema.fields {
        *type_counts.entry(field.field_type.as_str()).or_insert(0) += 1;
    }

    println!("  Field types:");
    for (field_type, count) in type_counts {
        println!("    - {}: {}", field_type, count);
    }
}
