use crate::domain::types::EntityId;
use crate::dto::records::CommunicationsPageData;
use crate::repository::{CommunicationListQuery, CommunicationReader};
use crate::services::ServiceResult;

/// Communication log, newest first, optionally for one client.
pub fn load_communications<R>(
    repo: &R,
    client_id: Option<&str>,
) -> ServiceResult<CommunicationsPageData>
where
    R: CommunicationReader + ?Sized,
{
    let mut query = CommunicationListQuery::new();
    // An unusable id is treated as no filter.
    if let Some(id) = client_id.and_then(|id| EntityId::new(id).ok()) {
        query = query.client(id);
    }

    let communications = repo.list_communications(query)?;
    Ok(CommunicationsPageData { communications })
}
