// tests/api_integration_test.rs
// ===================================
// Drives the HTTP surface through Rocket's local client: estimate (query and
// JSON), form labels, route catalog, samples and error handling.

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use spread_pnl::config::Config;
use spread_pnl::web::build_rocket;

fn client() -> Client {
    let rocket = build_rocket(&Config::default()).expect("Failed to build rocket");
    Client::tracked(rocket).expect("Failed to create local client")
}

fn get_json(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri).dispatch();
    let status = response.status();
    let body = response.into_json::<Value>().expect("Response was not JSON");
    (status, body)
}

#[test]
fn test_health() {
    let client = client();
    let response = client.get("/health").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().as_deref(), Some("OK"));
}

#[test]
fn test_estimate_with_defaults() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/estimate");

    assert_eq!(status, Status::Ok);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["route"]["dex_a"], "Uniswap v3");
    assert_eq!(body["inputs"]["slippage_pct"], "0.20");
    assert_eq!(body["metrics"]["buy_venue"], "A");
    assert_eq!(body["metrics"]["sell_venue"], "B");
    assert_eq!(body["display"]["gross_spread"]["value"], "0.400%");
    assert_eq!(body["display"]["effective_buy"]["subtitle"], "Uniswap v3");
    assert_eq!(body["display"]["units_traded"]["subtitle"], "ETH");
    assert!(body["error"].is_null());

    let pnl = body["metrics"]["pnl"].as_f64().expect("pnl should be a number");
    assert!((pnl - (-13.98999011)).abs() < 1e-6);

    println!("📊 {}", serde_json::to_string_pretty(&body).expect("Failed to pretty-print"));
}

#[test]
fn test_estimate_query_overrides_and_route() {
    let client = client();
    let (status, body) = get_json(
        &client,
        "/api/v1/estimate?price_a=3012&price_b=3000&dex_a=Curve&dex_b=Balancer&pair=BTC%2FUSDC",
    );

    assert_eq!(status, Status::Ok);
    assert_eq!(body["metrics"]["buy_venue"], "B");
    assert_eq!(body["display"]["effective_buy"]["subtitle"], "Balancer");
    assert_eq!(body["display"]["effective_sell"]["subtitle"], "Curve");
    assert_eq!(body["display"]["units_traded"]["subtitle"], "BTC");
}

#[test]
fn test_estimate_invalid_input_is_indeterminate() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/estimate?price_a=abc&price_b=100&trade_size=10");

    assert_eq!(status, Status::Ok);
    assert_eq!(body["status"], "INDETERMINATE");
    assert!(body["metrics"].is_null());
    assert_eq!(body["invalid_field"], "price_a");
    assert_eq!(body["display"]["net_pnl"]["value"], "-");
    assert_eq!(body["display"]["effective_buy"]["subtitle"], "");
    assert!(body["error"].as_str().expect("error should be text").contains("price_a"));
}

#[test]
fn test_estimate_zero_trade_size_is_indeterminate() {
    let client = client();
    let (_, body) = get_json(&client, "/api/v1/estimate?trade_size=0");
    assert_eq!(body["status"], "INDETERMINATE");
    assert_eq!(body["invalid_field"], "trade_size");
}

#[test]
fn test_estimate_unknown_dex_is_bad_request() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/estimate?dex_a=Nowhere");
    assert_eq!(status, Status::BadRequest);
    assert!(body["error"].as_str().expect("error should be text").contains("Nowhere"));
}

#[test]
fn test_estimate_json_accepts_numbers_and_text() {
    let client = client();
    let request = json!({
        "price_a": 3000,
        "price_b": 3000,
        "trade_size": "500",
        "fee_bps_a": 0,
        "fee_bps_b": "0",
        "slippage_pct": 0,
        "gas_cost": 0,
        "route": { "pair": "SOL/USDC" }
    });

    let response = client
        .post("/api/v1/estimate")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let body = response.into_json::<Value>().expect("Response was not JSON");
    assert_eq!(body["status"], "OK");
    assert_eq!(body["route"]["pair"], "SOL/USDC");
    assert_eq!(body["metrics"]["spread_pct"].as_f64(), Some(0.0));
    assert_eq!(body["metrics"]["breakeven_pct"].as_f64(), Some(0.0));
    assert_eq!(body["display"]["units_traded"]["subtitle"], "SOL");
}

#[test]
fn test_estimate_swap_exchanges_venues() {
    let client = client();
    let (_, plain) = get_json(&client, "/api/v1/estimate?fee_bps_b=45");
    let (status, swapped) = get_json(&client, "/api/v1/estimate?fee_bps_b=45&swap=true");

    assert_eq!(status, Status::Ok);
    assert_eq!(swapped["route"]["dex_a"], "SushiSwap");
    assert_eq!(swapped["route"]["dex_b"], "Uniswap v3");
    assert_eq!(swapped["inputs"]["price_a"], "3012");
    assert_eq!(swapped["inputs"]["price_b"], "3000");
    assert_eq!(swapped["inputs"]["fee_bps_a"], "45");
    assert_eq!(swapped["inputs"]["fee_bps_b"], "30");

    // Same trade, venues relabelled
    assert_eq!(swapped["metrics"]["buy_venue"], "B");
    assert_eq!(swapped["display"]["effective_buy"]["subtitle"], "Uniswap v3");
    assert_eq!(swapped["display"]["effective_sell"]["subtitle"], "SushiSwap");
    assert_eq!(swapped["metrics"]["pnl"], plain["metrics"]["pnl"]);
    assert_eq!(swapped["display"]["net_pnl"], plain["display"]["net_pnl"]);
}

#[test]
fn test_estimate_json_swap() {
    let client = client();
    let request = json!({ "price_a": 101, "price_b": 100, "swap": true });

    let response = client
        .post("/api/v1/estimate")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let body = response.into_json::<Value>().expect("Response was not JSON");
    assert_eq!(body["inputs"]["price_a"], "100");
    assert_eq!(body["metrics"]["buy_venue"], "A");
    assert_eq!(body["display"]["effective_buy"]["subtitle"], "SushiSwap");
}

#[test]
fn test_estimate_json_malformed_body() {
    let client = client();
    let response = client
        .post("/api/v1/estimate")
        .header(ContentType::JSON)
        .body("{ not json")
        .dispatch();

    assert_ne!(response.status(), Status::Ok);
    let body = response.into_json::<Value>().expect("Catcher should answer in JSON");
    assert!(body["error"].is_string());
}

#[test]
fn test_form_labels_follow_route() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/form?dex_a=Curve&pair=ARB%2FETH");

    assert_eq!(status, Status::Ok);
    let fields = body["fields"].as_array().expect("fields should be a list");
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[0]["field"], "price_a");
    assert_eq!(fields[0]["label"], "Curve price (ETH)");
    assert_eq!(fields[1]["label"], "SushiSwap price (ETH)");
    assert_eq!(fields[3]["label"], "Curve taker fee (bps)");
    assert_eq!(fields[0]["value"], "3000");
}

#[test]
fn test_route_catalog() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/routes");

    assert_eq!(status, Status::Ok);
    assert_eq!(body["dexes"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["pairs"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["default_route"]["pair"], "ETH/USDC");
}

#[test]
fn test_samples() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/samples?pair=ETH%2FUSDT");

    assert_eq!(status, Status::Ok);
    assert_eq!(body["pair"], "ETH/USDT");
    assert!(body["disclaimer"].as_str().expect("disclaimer").contains("illustrative"));

    let rows = body["rows"].as_array().expect("rows should be a list");
    assert!(rows.len() <= 5);
    let nets: Vec<f64> = rows.iter().filter_map(|r| r["net_pct"].as_f64()).collect();
    assert!(nets.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_samples_unknown_pair() {
    let client = client();
    let (status, _) = get_json(&client, "/api/v1/samples?pair=DOGE%2FUSDC");
    assert_eq!(status, Status::BadRequest);
}
