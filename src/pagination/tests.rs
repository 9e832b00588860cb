//! Tests for pagination module

use super::*;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Continuation Tests
// ============================================================================

#[test_case(json!({"pagination": {"has_next_page": true}}), Continuation::More ; "flag true")]
#[test_case(json!({"pagination": {"has_next_page": false}}), Continuation::LastPage ; "flag false")]
#[test_case(json!({"pagination": {}}), Continuation::Missing ; "flag absent")]
#[test_case(json!({"data": []}), Continuation::Missing ; "pagination absent")]
#[test_case(json!({"pagination": {"has_next_page": null}}), Continuation::Missing ; "flag null")]
#[test_case(json!({"pagination": {"has_next_page": "yes"}}), Continuation::Missing ; "flag not a bool")]
#[test_case(json!({"pagination": true}), Continuation::Missing ; "pagination not an object")]
fn test_read_continuation(body: serde_json::Value, expected: Continuation) {
    assert_eq!(read_continuation(&body, DEFAULT_FLAG_PATH), expected);
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_advances() {
    let mut state = PaginationState::with_page(1);
    state.next_page();
    state.next_page();
    assert_eq!(state.page, 3);
}

// ============================================================================
// PageNumberPaginator Tests
// ============================================================================

#[test]
fn test_paginator_defaults() {
    let paginator = PageNumberPaginator::default();
    assert_eq!(paginator.start_page, 1);
    assert_eq!(paginator.flag_path, "pagination.has_next_page");
    assert_eq!(paginator.initial_state().page, 1);
}

#[test]
fn test_paginator_advances_one_page_at_a_time() {
    let paginator = PageNumberPaginator::default();
    let mut state = paginator.initial_state();
    let body = json!({"pagination": {"has_next_page": true}});

    assert_eq!(
        paginator.process_response(&body, &mut state),
        NextPage::Continue { page: 2 }
    );
    assert_eq!(
        paginator.process_response(&body, &mut state),
        NextPage::Continue { page: 3 }
    );
    assert_eq!(state.page, 3);
}

#[test]
fn test_paginator_stops_on_last_page_regardless_of_index() {
    let paginator = PageNumberPaginator::new(41);
    let mut state = paginator.initial_state();
    let body = json!({"pagination": {"has_next_page": false}});

    let next = paginator.process_response(&body, &mut state);
    assert_eq!(
        next,
        NextPage::Done {
            reason: StopReason::LastPage
        }
    );
    assert_eq!(state.page, 41);
}

#[test]
fn test_paginator_missing_flag_stops() {
    let paginator = PageNumberPaginator::default();
    let mut state = paginator.initial_state();

    let next = paginator.process_response(&json!({"data": []}), &mut state);
    assert_eq!(
        next,
        NextPage::Done {
            reason: StopReason::FlagMissing
        }
    );
    assert_eq!(state.page, 1);
}
