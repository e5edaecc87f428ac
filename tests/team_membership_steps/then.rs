//! Then steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use rstest_bdd_macros::then;
use taskhive::{
    rules::{InvariantViolation, PrivilegeRequirement, RuleViolation},
    team::services::TeamServiceError,
};

fn last_result(
    world: &TeamMembershipWorld,
) -> Result<&Result<taskhive::team::domain::Team, TeamServiceError>, eyre::Report> {
    world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing membership result"))
}

#[then("the membership change succeeds")]
fn membership_change_succeeds(world: &TeamMembershipWorld) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if let Err(err) = result {
        return Err(eyre::eyre!("expected success, got {err}"));
    }
    Ok(())
}

#[then("the membership change fails because the member has open tasks")]
fn fails_with_open_tasks(world: &TeamMembershipWorld) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if !matches!(
        result,
        Err(TeamServiceError::Rule(RuleViolation::BusinessInvariantViolation(
            InvariantViolation::MemberHasOpenTasks { .. }
        )))
    ) {
        return Err(eyre::eyre!("expected MemberHasOpenTasks, got {result:?}"));
    }
    Ok(())
}

#[then("the membership change fails because the team is at capacity")]
fn fails_at_capacity(world: &TeamMembershipWorld) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if !matches!(
        result,
        Err(TeamServiceError::Rule(RuleViolation::BusinessInvariantViolation(
            InvariantViolation::TeamAtCapacity { capacity: 50, .. }
        )))
    ) {
        return Err(eyre::eyre!("expected TeamAtCapacity, got {result:?}"));
    }
    Ok(())
}

#[then("the membership change fails for insufficient privilege")]
fn fails_for_privilege(world: &TeamMembershipWorld) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if !matches!(
        result,
        Err(TeamServiceError::Rule(RuleViolation::InsufficientPrivilege {
            requirement: PrivilegeRequirement::TeamManager,
            ..
        }))
    ) {
        return Err(eyre::eyre!("expected InsufficientPrivilege, got {result:?}"));
    }
    Ok(())
}

fn is_member(world: &TeamMembershipWorld, username: &str) -> Result<bool, eyre::Report> {
    let user_id = world.person(username)?.id();
    let team_id = world.team()?.id();
    let stored = run_async(world.teams.find_by_id(team_id))?
        .ok_or_else(|| eyre::eyre!("team disappeared"))?;
    Ok(stored.is_member(user_id))
}

#[then(r#""{username}" is a team member"#)]
fn is_team_member(world: &TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    eyre::ensure!(is_member(world, &username)?, "{username} should be a member");
    Ok(())
}

#[then(r#""{username}" is not a team member"#)]
fn is_not_team_member(world: &TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    eyre::ensure!(!is_member(world, &username)?, "{username} should not be a member");
    Ok(())
}
