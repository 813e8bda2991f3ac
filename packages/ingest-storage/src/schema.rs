pub fn render_records_schema(database: &str, collection: &str) -> String {
	include_str!("../../../sql/records.sql")
		.replace("<SCHEMA>", database)
		.replace("<COLLECTION>", collection)
}

pub fn render_status_schema(database: &str) -> String {
	include_str!("../../../sql/status.sql").replace("<SCHEMA>", database)
}

/// Double-quoted `schema.table` reference. Names are validated as plain identifiers by the config
/// layer before they reach here.
pub fn qualified(database: &str, table: &str) -> String {
	format!(r#""{database}"."{table}""#)
}
