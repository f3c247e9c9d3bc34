use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!(
        "Request processed: {} - Status: {} - Duration: {}ms",
        endpoint, status, duration_ms
    );
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Believer roster service starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_status_check() {
    debug!("Status check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_believer_created(id: &str, full_name: &str) {
    info!("Believer created: {} - Name: {}", id, full_name);
}

pub fn log_believer_updated(id: &str, full_name: &str) {
    info!("✏️ Believer updated: {} - Name: {}", id, full_name);
}

pub fn log_believer_deleted(id: &str) {
    info!("Believer deleted: {}", id);
}

pub fn log_duplicate_check(full_name: &str, pool_size: usize, candidates: usize) {
    info!(
        "Duplicate check for '{}': {} pool records, {} candidates",
        full_name, pool_size, candidates
    );
}

pub fn log_export(rows: usize) {
    info!("📋 Exported {} believers to CSV", rows);
}

pub fn log_rank_created(code: &str, display_name: &str) {
    info!("Rank created: {} - {}", code, display_name);
}

pub fn log_ranks_seeded(count: usize) {
    info!("✅ Seeded {} default ranks", count);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
