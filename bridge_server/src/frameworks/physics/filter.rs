// Maps `CollisionFilter` onto rapier's interaction groups and contact hooks.
//
// Category/mask pairs translate directly into `InteractionGroups`. The group
// override has no rapier equivalent, so grouped colliders keep open
// interaction groups, carry their packed filter in `user_data` and are
// decided by `FilterHooks`.

use crate::domain::CollisionFilter;
use rapier2d::prelude::*;

pub(super) fn interaction_groups(filter: CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(filter.category),
        Group::from_bits_truncate(filter.mask),
    )
}

/// Pack a filter into a collider's `user_data`.
pub(super) fn encode(filter: CollisionFilter) -> u128 {
    u128::from(filter.category)
        | u128::from(filter.mask) << 32
        | u128::from(filter.group as u32) << 64
}

pub(super) fn decode(data: u128) -> CollisionFilter {
    CollisionFilter {
        category: data as u32,
        mask: (data >> 32) as u32,
        group: (data >> 64) as u32 as i32,
    }
}

/// Contact hook for colliders whose filter sets a group.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct FilterHooks;

impl PhysicsHooks for FilterHooks {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        let a = decode(context.colliders.get(context.collider1)?.user_data);
        let b = decode(context.colliders.get(context.collider2)?.user_data);
        a.can_collide(&b).then_some(SolverFlags::COMPUTE_IMPULSES)
    }
}
