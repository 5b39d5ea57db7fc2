use super::*;

fn id(raw: &str) -> ClientId {
    ClientId::from(raw)
}

#[test]
fn starts_idle() {
    let workflow = DeletionWorkflow::new();
    assert_eq!(workflow.state(), &DeletionState::Idle);
    assert!(workflow.pending_id().is_none());
    assert!(!workflow.is_pending());
}

#[test]
fn request_then_confirm_returns_to_idle() {
    let mut workflow = DeletionWorkflow::new();
    let ticket = workflow.request_delete(id("2"));

    assert_eq!(workflow.pending_id(), Some(&id("2")));
    assert_eq!(workflow.pending_ticket(), Some(ticket));

    assert_eq!(workflow.confirm(), Some(id("2")));
    assert_eq!(workflow.state(), &DeletionState::Idle);
}

#[test]
fn cancel_returns_to_idle_without_yielding_a_target() {
    let mut workflow = DeletionWorkflow::new();
    workflow.request_delete(id("2"));

    assert_eq!(workflow.cancel(), Some(id("2")));
    assert!(!workflow.is_pending());
    assert_eq!(workflow.confirm(), None);
}

#[test]
fn confirm_and_cancel_while_idle_are_no_ops() {
    let mut workflow = DeletionWorkflow::new();
    assert_eq!(workflow.confirm(), None);
    assert_eq!(workflow.cancel(), None);
    assert_eq!(workflow.state(), &DeletionState::Idle);
}

#[test]
fn latest_request_wins() {
    let mut workflow = DeletionWorkflow::new();
    let first = workflow.request_delete(id("1"));
    let second = workflow.request_delete(id("2"));

    assert_ne!(first, second);
    assert_eq!(workflow.pending_id(), Some(&id("2")));
    assert_eq!(workflow.confirm(), Some(id("2")));
    assert_eq!(workflow.confirm(), None);
}

#[test]
fn stale_ticket_cannot_confirm_newer_request() {
    let mut workflow = DeletionWorkflow::new();
    let stale = workflow.request_delete(id("1"));
    let current = workflow.request_delete(id("2"));

    assert_eq!(workflow.confirm_ticket(stale), None);
    assert_eq!(workflow.pending_id(), Some(&id("2")));

    assert_eq!(workflow.confirm_ticket(current), Some(id("2")));
    assert!(!workflow.is_pending());
}

#[test]
fn ticket_is_spent_after_confirmation() {
    let mut workflow = DeletionWorkflow::new();
    let ticket = workflow.request_delete(id("3"));
    assert_eq!(workflow.confirm_ticket(ticket), Some(id("3")));
    assert_eq!(workflow.confirm_ticket(ticket), None);
}

#[test]
fn rerequesting_same_id_issues_new_ticket() {
    let mut workflow = DeletionWorkflow::new();
    let first = workflow.request_delete(id("4"));
    let second = workflow.request_delete(id("4"));

    assert_ne!(first, second);
    assert_eq!(workflow.confirm_ticket(first), None);
    assert_eq!(workflow.confirm_ticket(second), Some(id("4")));
}
