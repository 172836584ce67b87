pub mod use_api_client;
pub mod use_editable_table;
pub mod use_report_downloads;
