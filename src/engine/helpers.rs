use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;

// ========== Moeda ==========
pub fn format_brl(value: f64) -> String {
    format!("R$ {:.2}", value)
}

/// Preço por 1000 unidades, com 4 casas como no catálogo
pub fn format_rate(rate: f64) -> String {
    format!("R$ {:.4}/1000", rate)
}

// ========== Datas ==========
pub fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".into())
}

// ========== Texto ==========

/// Corta o link em `max` caracteres, acrescentando "..."
pub fn truncate_link(link: &str, max: usize) -> String {
    if link.chars().count() <= max {
        return link.to_string();
    }
    let cut: String = link.chars().take(max).collect();
    format!("{}...", cut)
}

/// "In progress" → "in-progress"
pub fn status_slug(status: &str) -> String {
    status
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ========== Validação de link do pedido ==========
pub fn validate_link(raw: &str) -> Result<(), String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Campo link é obrigatório".into());
    }
    match url::Url::parse(raw) {
        Ok(u) => {
            if u.scheme() != "http" && u.scheme() != "https" {
                return Err("O link deve usar http ou https".into());
            }
            if u.host().is_none() {
                return Err("Link inválido".into());
            }
            Ok(())
        }
        Err(_) => Err("Link inválido".into()),
    }
}

// ========== QR Code PIX ==========

/// PNG do QR Code; aceita com ou sem o prefixo `data:image/png;base64,`
pub fn decode_qr_png(encoded: &str) -> Result<Vec<u8>, String> {
    let encoded = encoded.trim();
    let raw = match encoded.split_once("base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    if raw.is_empty() {
        return Err("QR Code indisponível".into());
    }
    STANDARD
        .decode(raw.as_bytes())
        .map_err(|e| format!("QR Code inválido: {}", e))
}
