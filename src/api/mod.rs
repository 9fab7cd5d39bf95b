use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{SipParameters, SipResult, project};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "sip",
    about = "SIP projection: future value of a recurring monthly investment"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 5000.0,
        help = "Monthly contribution in currency units"
    )]
    monthly_investment: f64,
    #[arg(
        long,
        default_value_t = 12.0,
        help = "Expected annual return rate in percent, e.g. 12"
    )]
    annual_return: f64,
    #[arg(long, default_value_t = 10, help = "Investment period in whole years")]
    years: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    #[serde(alias = "monthly_investment")]
    monthly_investment: Option<f64>,
    #[serde(alias = "annual_return", alias = "annualReturnPercent")]
    annual_return: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthPoint {
    month: u32,
    value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    monthly_investment: f64,
    annual_return: f64,
    years: u32,
    months: u32,
    total_invested: f64,
    final_value: f64,
    gain: f64,
    total_invested_display: String,
    final_value_display: String,
    gain_display: String,
    warnings: Vec<String>,
    growth_series: Vec<GrowthPoint>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_parameters(cli: Cli) -> Result<SipParameters, String> {
    if !cli.monthly_investment.is_finite() {
        return Err("--monthly-investment must be a finite number".to_string());
    }

    if !cli.annual_return.is_finite() {
        return Err("--annual-return must be a finite number".to_string());
    }

    if cli.monthly_investment < 500.0 {
        return Err("--monthly-investment must be >= 500".to_string());
    }

    if cli.annual_return < 1.0 {
        return Err("--annual-return must be >= 1".to_string());
    }

    if cli.years < 1 {
        return Err("--years must be >= 1".to_string());
    }

    Ok(SipParameters {
        monthly_investment: cli.monthly_investment,
        annual_return_percent: cli.annual_return,
        years: cli.years,
    })
}

fn advisory_warnings(params: &SipParameters) -> Vec<String> {
    let mut warnings = Vec::new();
    if params.monthly_investment <= 500.0 {
        warnings.push(
            "Monthly investment amount seems very low. Consider investing more for better returns."
                .to_string(),
        );
    }
    if params.years < 3 {
        warnings.push(
            "Investment period is quite short. Longer periods benefit more from compounding."
                .to_string(),
        );
    }
    if params.annual_return_percent < 5.0 {
        warnings.push(
            "Expected return rate is quite low. Typical equity SIPs assume around 10-12%."
                .to_string(),
        );
    }
    warnings
}

fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn run_projection_cli(args: &[String]) -> Result<(), String> {
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    let params = build_parameters(cli)?;
    for warning in advisory_warnings(&params) {
        log::warn!("{warning}");
    }
    let result = project(&params).map_err(|e| e.to_string())?;

    println!("Months: {}", params.months());
    println!("Total invested: {}", format_amount(result.total_invested));
    println!("Estimated final value: {}", format_amount(result.final_value));
    println!("Total gain: {}", format_amount(result.gain));
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("SIP HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let params = match parameters_from_payload(payload) {
        Ok(params) => params,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let result = match project(&params) {
        Ok(result) => result,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let response = build_project_response(&params, &result);
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn parameters_from_json(json: &str) -> Result<SipParameters, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    parameters_from_payload(payload)
}

fn parameters_from_payload(payload: ProjectPayload) -> Result<SipParameters, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.monthly_investment {
        cli.monthly_investment = v;
    }
    if let Some(v) = payload.annual_return {
        cli.annual_return = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }

    build_parameters(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        monthly_investment: 5_000.0,
        annual_return: 12.0,
        years: 10,
    }
}

fn build_project_response(params: &SipParameters, result: &SipResult) -> ProjectResponse {
    ProjectResponse {
        monthly_investment: params.monthly_investment,
        annual_return: params.annual_return_percent,
        years: params.years,
        months: params.months(),
        total_invested: result.total_invested,
        final_value: result.final_value,
        gain: result.gain,
        total_invested_display: format_amount(result.total_invested),
        final_value_display: format_amount(result.final_value),
        gain_display: format_amount(result.gain),
        warnings: advisory_warnings(params),
        growth_series: result
            .growth_series
            .iter()
            .enumerate()
            .map(|(i, value)| GrowthPoint {
                month: i as u32 + 1,
                value: *value,
            })
            .collect(),
    }
}
