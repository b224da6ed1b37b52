//! Conversions between SeaORM entity models and domain types.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::Link;
use migration::entities::link;

/// Entity model → domain Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        original_url: model.original_url,
        short_code: model.short_code,
        created_at: model.created_at,
        clicks: model.clicks,
    }
}

/// Build the ActiveModel for a brand-new link.
///
/// `id` stays NotSet so the database assigns it; `clicks` always starts
/// at zero.
pub fn new_link_active_model(
    short_code: &str,
    original_url: &str,
    created_at: DateTime<Utc>,
) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        original_url: Set(original_url.to_string()),
        short_code: Set(short_code.to_string()),
        created_at: Set(created_at),
        clicks: Set(0),
    }
}
