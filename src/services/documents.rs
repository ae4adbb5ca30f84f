use crate::domain::document::DocumentCategory;
use crate::dto::records::DocumentsPageData;
use crate::repository::{DocumentListQuery, DocumentReader};
use crate::services::{ServiceError, ServiceResult};

/// Document register, optionally narrowed to one category.
///
/// The category accepts either label set; an unknown label is a form error.
pub fn load_documents<R>(repo: &R, category: Option<&str>) -> ServiceResult<DocumentsPageData>
where
    R: DocumentReader + ?Sized,
{
    let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(label) => Some(
            DocumentCategory::parse(label)
                .ok_or_else(|| ServiceError::Form(format!("Unknown category {label}")))?,
        ),
        None => None,
    };

    let mut query = DocumentListQuery::new();
    if let Some(category) = category {
        query = query.category(category);
    }

    let documents = repo.list_documents(query)?;
    Ok(DocumentsPageData {
        documents,
        category,
    })
}
