//! PoolMemberModel ↔ PoolMembership mapper

use pairweek_core::{PoolMembership, Snowflake};

use crate::models::PoolMemberModel;

impl From<PoolMemberModel> for PoolMembership {
    fn from(model: PoolMemberModel) -> Self {
        Self {
            community_id: Snowflake::new(model.community_id),
            user_id: Snowflake::new(model.user_id),
            joined_at: model.joined_at,
            skip_until: model.skip_until,
            last_sat_out_at: model.last_sat_out_at,
        }
    }
}
