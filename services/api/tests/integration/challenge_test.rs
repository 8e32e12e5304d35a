use staffdesk_api::domain::types::FlowType;
use staffdesk_api::error::ApiError;
use staffdesk_api::usecase::challenge::{
    IssueEmployeeChallengeInput, IssueEmployeeChallengeUseCase, IssueOwnerChallengeInput,
    IssueOwnerChallengeUseCase, consume_challenge,
};

use crate::helpers::{
    EMPLOYEE_EMAIL, MockChallengeStore, MockDelivery, MockEmployeeRepo, OWNER_PHONE,
    employee_challenge, expired_owner_challenge, owner_challenge, test_employee,
};

// ── Issuance ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_owner_challenge_and_send_sms() {
    let store = MockChallengeStore::empty();
    let handle = store.handle();
    let delivery = MockDelivery::default();
    let sms = std::sync::Arc::clone(&delivery.sms);

    let uc = IssueOwnerChallengeUseCase {
        challenges: store,
        delivery,
    };
    uc.execute(IssueOwnerChallengeInput {
        phone_number: OWNER_PHONE.to_owned(),
    })
    .await
    .unwrap();

    let challenges = handle.lock().unwrap();
    let challenge = challenges.get(OWNER_PHONE).expect("challenge stored");
    assert_eq!(challenge.flow, FlowType::OwnerPhone);
    assert_eq!(challenge.code.len(), 6);
    assert!(challenge.code.chars().all(|c| c.is_ascii_digit()));
    assert!(challenge.employee_uid.is_none());

    let sms = sms.lock().unwrap();
    assert_eq!(sms.len(), 1);
    assert_eq!(sms[0].0, OWNER_PHONE);
    assert!(sms[0].1.contains(&challenge.code));
}

#[tokio::test]
async fn should_keep_challenge_when_sms_delivery_fails() {
    let store = MockChallengeStore::empty();
    let handle = store.handle();

    let uc = IssueOwnerChallengeUseCase {
        challenges: store,
        delivery: MockDelivery::failing(),
    };
    // At-least-once semantics: a persisted-but-undelivered code is fine.
    uc.execute(IssueOwnerChallengeInput {
        phone_number: OWNER_PHONE.to_owned(),
    })
    .await
    .unwrap();

    assert!(handle.lock().unwrap().contains_key(OWNER_PHONE));
}

#[tokio::test]
async fn should_overwrite_previous_challenge_on_reissue() {
    let store = MockChallengeStore::empty();
    let handle = store.handle();
    let uc = IssueOwnerChallengeUseCase {
        challenges: store,
        delivery: MockDelivery::default(),
    };

    uc.execute(IssueOwnerChallengeInput {
        phone_number: OWNER_PHONE.to_owned(),
    })
    .await
    .unwrap();
    let first_code = handle.lock().unwrap().get(OWNER_PHONE).unwrap().code.clone();

    uc.execute(IssueOwnerChallengeInput {
        phone_number: OWNER_PHONE.to_owned(),
    })
    .await
    .unwrap();

    // Exactly one live challenge per subject.
    let second_code = {
        let challenges = handle.lock().unwrap();
        assert_eq!(challenges.len(), 1);
        challenges.get(OWNER_PHONE).unwrap().code.clone()
    };

    if first_code == second_code {
        // Random codes collided (p = 1e-6); the stale-code assertion below
        // would be vacuous this run.
        return;
    }

    // The stale code must never validate.
    let result = consume_challenge(
        &uc.challenges,
        OWNER_PHONE,
        FlowType::OwnerPhone,
        &first_code,
    )
    .await;
    assert!(
        matches!(
            result,
            Err(ApiError::InvalidCode) | Err(ApiError::ChallengeNotFound)
        ),
        "stale code must not validate, got {result:?}"
    );
}

#[tokio::test]
async fn should_issue_employee_challenge_with_uid_and_email() {
    let employee = test_employee();
    let store = MockChallengeStore::empty();
    let handle = store.handle();
    let delivery = MockDelivery::default();
    let emails = std::sync::Arc::clone(&delivery.emails);

    let uc = IssueEmployeeChallengeUseCase {
        employees: MockEmployeeRepo::new(vec![employee.clone()]),
        challenges: store,
        delivery,
    };
    uc.execute(IssueEmployeeChallengeInput {
        email: EMPLOYEE_EMAIL.to_owned(),
    })
    .await
    .unwrap();

    let challenges = handle.lock().unwrap();
    let challenge = challenges.get(EMPLOYEE_EMAIL).expect("challenge stored");
    assert_eq!(challenge.flow, FlowType::EmployeeEmail);
    assert_eq!(challenge.employee_uid, Some(employee.id));

    let emails = emails.lock().unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].0, EMPLOYEE_EMAIL);
    assert!(emails[0].2.contains(&challenge.code));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_employee_email() {
    let uc = IssueEmployeeChallengeUseCase {
        employees: MockEmployeeRepo::empty(),
        challenges: MockChallengeStore::empty(),
        delivery: MockDelivery::default(),
    };
    let result = uc
        .execute(IssueEmployeeChallengeInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
}

// ── Validation state machine ─────────────────────────────────────────────────

#[tokio::test]
async fn should_consume_challenge_once_and_reject_second_attempt() {
    let store = MockChallengeStore::with(owner_challenge("042531"));
    let handle = store.handle();

    consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531")
        .await
        .unwrap();
    assert!(handle.lock().unwrap().is_empty(), "terminal challenge must be removed");

    // Same code again, well within the original window → no active challenge.
    let result = consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531").await;
    assert!(
        matches!(result, Err(ApiError::ChallengeNotFound)),
        "expected ChallengeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_challenge_alive_after_wrong_code() {
    let store = MockChallengeStore::with(owner_challenge("042531"));
    let handle = store.handle();

    let result = consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "000000").await;
    assert!(matches!(result, Err(ApiError::InvalidCode)));

    // Retry is allowed until expiry: the record survives a mismatch.
    assert!(handle.lock().unwrap().contains_key(OWNER_PHONE));

    consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531")
        .await
        .unwrap();
}

#[tokio::test]
async fn should_expire_challenge_and_delete_it() {
    let store = MockChallengeStore::with(expired_owner_challenge("042531"));
    let handle = store.handle();

    // Even the correct code fails once past the deadline.
    let result = consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531").await;
    assert!(
        matches!(result, Err(ApiError::ChallengeExpired)),
        "expected ChallengeExpired, got {result:?}"
    );
    assert!(handle.lock().unwrap().is_empty(), "expired challenge must be removed");

    // Expiry is terminal; afterwards the challenge simply does not exist.
    let result = consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531").await;
    assert!(matches!(result, Err(ApiError::ChallengeNotFound)));
}

#[tokio::test]
async fn should_reject_cross_flow_validation() {
    // A code issued for the owner flow must never validate an employee
    // attempt on the same key namespace, and vice versa.
    let store = MockChallengeStore::with(owner_challenge("042531"));
    let result = consume_challenge(&store, OWNER_PHONE, FlowType::EmployeeEmail, "042531").await;
    assert!(matches!(result, Err(ApiError::ChallengeNotFound)));

    let uid = test_employee().id;
    let store = MockChallengeStore::with(employee_challenge("042531", uid));
    let result = consume_challenge(&store, EMPLOYEE_EMAIL, FlowType::OwnerPhone, "042531").await;
    assert!(matches!(result, Err(ApiError::ChallengeNotFound)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_subject() {
    let store = MockChallengeStore::empty();
    let result = consume_challenge(&store, OWNER_PHONE, FlowType::OwnerPhone, "042531").await;
    assert!(matches!(result, Err(ApiError::ChallengeNotFound)));
}
