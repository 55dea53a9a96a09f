use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/growth_standards.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the growth standards catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n"
    );

    let tables = catalog
        .get("tables")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Missing 'tables' array\n\
                 The catalog must have a top-level 'tables' array.\n"
            );
        });

    let total_rows = validate_tables(tables);

    println!(
        "cargo:warning=Validated growth catalog: {} tables, {total_rows} total rows",
        tables.len()
    );
}

fn validate_tables(tables: &[serde_json::Value]) -> usize {
    let mut seen = Vec::new();
    let mut total_rows = 0;

    for (i, table) in tables.iter().enumerate() {
        let metric = table
            .get("metric")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("\n\nCATALOG BUILD ERROR: Table {i} missing 'metric'\n"));
        let sex = table
            .get("sex")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("\n\nCATALOG BUILD ERROR: Table {i} missing 'sex'\n"));

        let key = format!("{metric}/{sex}");
        assert!(
            !seen.contains(&key),
            "\n\nCATALOG BUILD ERROR: Duplicate table '{key}'\n"
        );
        seen.push(key.clone());

        let rows = table
            .get("rows")
            .and_then(serde_json::Value::as_array)
            .unwrap_or_else(|| panic!("\n\nCATALOG BUILD ERROR: Table '{key}' missing 'rows'\n"));
        assert!(
            !rows.is_empty(),
            "\n\nCATALOG BUILD ERROR: Table '{key}' has no rows\n"
        );

        for (expected_age, row) in rows.iter().enumerate() {
            validate_row(row, &key, expected_age);
        }
        total_rows += rows.len();
    }

    total_rows
}

fn validate_row(row: &serde_json::Value, key: &str, expected_age: usize) {
    let age = row
        .get("age_months")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Table '{key}' row {expected_age} missing 'age_months'\n")
        });

    // Rows must be indexable directly by month
    assert!(
        usize::try_from(age).is_ok_and(|a| a == expected_age),
        "\n\nCATALOG BUILD ERROR: Table '{key}' is not contiguous\n\
         Expected age {expected_age}, found {age}.\n"
    );

    for field in ["l", "m", "s", "p3", "p50", "p97"] {
        let value = row
            .get(field)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Table '{key}' age {age} missing '{field}'\n")
            });
        assert!(
            value.is_finite(),
            "\n\nCATALOG BUILD ERROR: Table '{key}' age {age} has non-finite '{field}'\n"
        );
        if field == "m" || field == "s" {
            assert!(
                value > 0.0,
                "\n\nCATALOG BUILD ERROR: Table '{key}' age {age} has non-positive '{field}'\n"
            );
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/growth_standards.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
