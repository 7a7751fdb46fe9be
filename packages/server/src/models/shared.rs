use crate::error::AppError;

/// Validate a category-style bilingual name: both languages required.
pub fn require_both_names(name_ar: &str, name_en: &str) -> Result<(String, String), AppError> {
    let ar = name_ar.trim();
    let en = name_en.trim();
    if ar.is_empty() || en.is_empty() {
        return Err(AppError::Validation(
            "Both name_ar and name_en are required".into(),
        ));
    }
    Ok((ar.to_string(), en.to_string()))
}

/// Validate a brand-style bilingual name: at least one language required.
///
/// Deliberately asymmetric from categories, which need both.
pub fn require_any_name(name_ar: &str, name_en: &str) -> Result<(String, String), AppError> {
    let ar = name_ar.trim();
    let en = name_en.trim();
    if ar.is_empty() && en.is_empty() {
        return Err(AppError::Validation(
            "At least one of name_ar or name_en is required".into(),
        ));
    }
    Ok((ar.to_string(), en.to_string()))
}
