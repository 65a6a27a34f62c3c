/*
[INPUT]:  TUSHARE_TOKEN environment variable
[OUTPUT]: Listed stock names printed to stdout
[POS]:    Examples - blocking client
[UPDATE]: When the blocking client API changes
*/

use tushare_pro_adapter::*;

/// Example: list stocks with the blocking client
fn main() {
    println!("=== Tushare Pro Blocking Example ===\n");

    let token = std::env::var("TUSHARE_TOKEN").unwrap_or_default();
    let api = match DataApi::new(token) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match api
        .call("stock_basic")
        .fields("ts_code,name,list_date")
        .param("list_status", "L")
        .send()
    {
        Ok(table) => {
            println!("✓ {} rows, columns {:?}", table.len(), table.columns());
            for record in table.records().iter().take(5) {
                println!("  {}", serde_json::Value::Object(record.clone()));
            }
        }
        Err(TushareError::Api { code, message }) => {
            println!("✗ Rejected by server (code {}): {}", code, message)
        }
        Err(e) => println!("✗ Error: {}", e),
    }
}
