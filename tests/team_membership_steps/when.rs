//! When steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use rstest_bdd_macros::when;
use taskhive::team::services::{AddMemberRequest, RemoveMemberRequest};

#[when(r#""{actor}" removes "{member}" from the team"#)]
fn remove_member(
    world: &mut TeamMembershipWorld,
    actor: String,
    member: String,
) -> Result<(), eyre::Report> {
    let actor_id = world.person(&actor)?.id();
    let member_id = world.person(&member)?.id();
    let team_id = world.team()?.id();

    let result = run_async(
        world
            .teams
            .remove_member(RemoveMemberRequest::new(actor_id, team_id, member_id)),
    );
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{actor}" adds "{member}" to the team"#)]
fn add_member(
    world: &mut TeamMembershipWorld,
    actor: String,
    member: String,
) -> Result<(), eyre::Report> {
    let actor_id = world.person(&actor)?.id();
    let member_id = world.person(&member)?.id();
    let team_id = world.team()?.id();

    let result = run_async(
        world
            .teams
            .add_member(AddMemberRequest::new(actor_id, team_id, member_id)),
    );
    world.last_result = Some(result);
    Ok(())
}
