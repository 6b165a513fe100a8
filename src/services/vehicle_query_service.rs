//! Ejecutor de consultas paginadas
//!
//! Cuenta primero y sólo busca la página si hay resultados. El mismo
//! `Predicate` se usa para el conteo y para la página, así `totalElements`
//! y `content` nunca discrepan.

use crate::models::Vehicle;
use crate::query::{total_pages, PageEnvelope, PageRequest, Predicate};
use crate::repositories::{StoreResult, VehicleStore};

/// Ejecutar una consulta paginada contra el store
pub async fn execute(
    store: &dyn VehicleStore,
    predicate: &Predicate,
    request: &PageRequest,
) -> StoreResult<PageEnvelope<Vehicle>> {
    let total = store.count(predicate).await?;
    if total == 0 {
        // Se devuelve la página tal como llegó, sin normalizar
        return Ok(PageEnvelope::empty(request.requested_page()));
    }

    let resolved = request.resolve();
    if resolved.page > total_pages(total, resolved.size) {
        // Más allá de la última página: vacío, con los totales correctos
        return Ok(PageEnvelope::new(Vec::new(), total, resolved.size, resolved.page));
    }

    let content = store
        .query(
            predicate,
            &resolved.sort,
            resolved.offset(),
            Some(resolved.limit()),
        )
        .await?;

    log::debug!(
        "📄 Page {} (size {}): {} of {} vehicles",
        resolved.page,
        resolved.size,
        content.len(),
        total
    );

    Ok(PageEnvelope::new(
        content,
        total,
        resolved.size,
        resolved.page,
    ))
}
