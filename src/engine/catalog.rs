use crate::engine::helpers::{contains_ignore_case, validate_link};
use crate::models::{OrderRequest, Service};

/// Filtra o catálogo por busca (nome ou descrição) e categoria exata
pub fn filter_services<'a>(
    services: &'a [Service],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Service> {
    let search = search.trim();
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    services
        .iter()
        .filter(|s| {
            search.is_empty()
                || contains_ignore_case(&s.name, search)
                || s.description
                    .as_deref()
                    .is_some_and(|d| contains_ignore_case(d, search))
        })
        .filter(|s| match category {
            Some(cat) => s.category.as_deref() == Some(cat),
            None => true,
        })
        .collect()
}

pub fn find_service(services: &[Service], service_id: i64) -> Option<&Service> {
    services.iter().find(|s| s.service_id == service_id)
}

/// Total estimado do pedido: preço por mil × quantidade
pub fn estimate_order_total(final_rate: f64, quantity: i64) -> f64 {
    if quantity <= 0 {
        return 0.0;
    }
    final_rate * quantity as f64 / 1000.0
}

/// Validação local antes de enviar o pedido
pub fn validate_order(request: &OrderRequest, service: &Service) -> Result<(), String> {
    validate_link(&request.link)?;
    if request.quantity < service.min || request.quantity > service.max {
        return Err(format!(
            "Quantidade deve estar entre {} e {}",
            service.min, service.max
        ));
    }
    Ok(())
}
