use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use staffdesk_auth_types::token::SessionClaims;
use staffdesk_domain::role::Role;

use staffdesk_api::error::ApiError;
use staffdesk_api::usecase::token::{
    VerifyTokenUseCase, issue_employee_token, issue_owner_token,
};

use crate::helpers::{EMPLOYEE_EMAIL, MockEmployeeRepo, OWNER_PHONE, TEST_JWT_SECRET, test_employee};

fn verify_with(employees: MockEmployeeRepo) -> VerifyTokenUseCase<MockEmployeeRepo> {
    VerifyTokenUseCase {
        employees,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_verify_owner_token() {
    let (token, _) = issue_owner_token(OWNER_PHONE, TEST_JWT_SECRET).unwrap();

    let claims = verify_with(MockEmployeeRepo::empty())
        .execute(&token)
        .await
        .unwrap();
    assert_eq!(claims.role, Role::Owner);
    assert_eq!(claims.sub, OWNER_PHONE);
}

#[tokio::test]
async fn should_verify_employee_token_when_employee_exists() {
    let employee = test_employee();
    let (token, _) = issue_employee_token(employee.id, EMPLOYEE_EMAIL, TEST_JWT_SECRET).unwrap();

    let claims = verify_with(MockEmployeeRepo::new(vec![employee.clone()]))
        .execute(&token)
        .await
        .unwrap();
    assert_eq!(claims.role, Role::Employee);
    assert_eq!(claims.sub, employee.id.to_string());
}

#[tokio::test]
async fn should_reject_employee_token_after_employee_deleted() {
    let employee = test_employee();
    let (token, _) = issue_employee_token(employee.id, EMPLOYEE_EMAIL, TEST_JWT_SECRET).unwrap();

    let result = verify_with(MockEmployeeRepo::empty()).execute(&token).await;
    assert!(
        matches!(result, Err(ApiError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (token, _) = issue_owner_token(OWNER_PHONE, "other-secret").unwrap();

    let result = verify_with(MockEmployeeRepo::empty()).execute(&token).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_tampered_token() {
    let (token, _) = issue_owner_token(OWNER_PHONE, TEST_JWT_SECRET).unwrap();

    // Alter one byte of the signature.
    let (head, sig) = token.rsplit_once('.').unwrap();
    let mut sig = sig.to_owned();
    let last = sig.pop().unwrap();
    sig.push(if last == 'A' { 'B' } else { 'A' });
    let tampered = format!("{head}.{sig}");

    let result = verify_with(MockEmployeeRepo::empty()).execute(&tampered).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_expired_token() {
    // Hand-roll a token whose exp is far in the past.
    let claims = SessionClaims {
        sub: OWNER_PHONE.to_owned(),
        email: None,
        role: Role::Owner,
        iat: 1_000_000,
        exp: 1_003_600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let result = verify_with(MockEmployeeRepo::empty()).execute(&token).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let result = verify_with(MockEmployeeRepo::empty())
        .execute("not-a-jwt")
        .await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_employee_token_with_non_uuid_subject() {
    // An employee-role token whose sub is not a uid can only come from a
    // forged or corrupted claim set.
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = SessionClaims {
        sub: "not-a-uuid".to_owned(),
        email: Some(EMPLOYEE_EMAIL.to_owned()),
        role: Role::Employee,
        iat: now,
        exp: now + 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let result = verify_with(MockEmployeeRepo::new(vec![test_employee()]))
        .execute(&token)
        .await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn tokens_for_different_roles_are_not_interchangeable() {
    let employee = test_employee();
    let (owner_token, _) = issue_owner_token(OWNER_PHONE, TEST_JWT_SECRET).unwrap();
    let (employee_token, _) =
        issue_employee_token(employee.id, EMPLOYEE_EMAIL, TEST_JWT_SECRET).unwrap();

    let owner_claims = verify_with(MockEmployeeRepo::new(vec![employee.clone()]))
        .execute(&owner_token)
        .await
        .unwrap();
    let employee_claims = verify_with(MockEmployeeRepo::new(vec![employee]))
        .execute(&employee_token)
        .await
        .unwrap();

    assert_eq!(owner_claims.role, Role::Owner);
    assert_eq!(employee_claims.role, Role::Employee);
    assert_ne!(Uuid::parse_str(&owner_claims.sub).ok(), Some(test_employee().id));
}
