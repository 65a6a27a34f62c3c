/*
[INPUT]:  TUSHARE_TOKEN environment variable
[OUTPUT]: Trading calendar rows printed to stdout
[POS]:    Examples - async client inside a scoped session
[UPDATE]: When the async client API changes
*/

use tushare_pro_adapter::*;

/// Example: query the SSE trading calendar with the async client
///
/// The session is closed when the scope ends, whatever the outcome.
#[tokio::main]
async fn main() {
    println!("=== Tushare Pro Async Example ===\n");

    let token = std::env::var("TUSHARE_TOKEN").unwrap_or_default();
    let api = match AsyncDataApi::new(token) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let result = api
        .scope(|api| {
            Box::pin(async move {
                api.endpoint(ApiName::TradeCal)
                    .fields("exchange,cal_date,is_open")
                    .param("exchange", "SSE")
                    .param("start_date", "20240101")
                    .param("end_date", "20240110")
                    .await
            })
        })
        .await;

    match result {
        Ok(table) => {
            println!("{}", table.columns().join("\t"));
            for row in table.rows() {
                let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
                println!("{}", cells.join("\t"));
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nsession closed: {:?}", api.closed());
}
