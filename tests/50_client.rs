mod common;

use anyhow::Result;

use stackweb_api::client::{ApiClient, ClientError, IntakeWizard};
use stackweb_api::types::{CommunicationMethod, Domain};

use common::{serve, test_app, valid_submission, ADMIN_CODE};

async fn client() -> Result<ApiClient> {
    let (app, _store) = test_app();
    let url = serve(app).await?;
    Ok(ApiClient::new(&url)?)
}

#[tokio::test]
async fn wizard_submission_reaches_admin_list() -> Result<()> {
    let client = client().await?;

    let mut wizard = IntakeWizard::new();
    wizard.set_website_type("professional")?;
    wizard.next()?;
    wizard.set_project_details("Law Firm", "Five page site");
    wizard.toggle_communication_method(CommunicationMethod::Whatsapp);
    wizard.toggle_communication_method(CommunicationMethod::Message);
    wizard.next()?;
    wizard.set_budget("2499");
    wizard.next()?;
    wizard.set_domain(Domain::Stackweb);
    wizard.next()?;
    wizard.set_contact("Meera", "meera@firm.in", "+91 90000 00000", "");
    wizard.next()?;

    let project = client.submit_project(&wizard.submission()?).await?;
    assert_eq!(project.communication_methods, "whatsapp, message");
    assert_eq!(project.company, None);

    let projects = client.verify_admin(ADMIN_CODE).await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, project.id);
    Ok(())
}

#[tokio::test]
async fn api_errors_keep_status_and_fields() -> Result<()> {
    let client = client().await?;

    let mut payload = valid_submission();
    payload["email"] = serde_json::json!("nope");
    match client.submit_project(&payload).await {
        Err(ClientError::Api { status, field_errors, .. }) => {
            assert_eq!(status, 400);
            assert!(field_errors.contains_key("email"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    match client.verify_admin("wrong").await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid admin code");
        }
        other => panic!("expected 401, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn admin_delete_and_clear() -> Result<()> {
    let client = client().await?;
    let a = client.submit_project(&valid_submission()).await?;
    client.submit_project(&valid_submission()).await?;

    assert!(matches!(
        client.delete_project("wrong", &a.id).await,
        Err(ClientError::Api { status: 401, .. })
    ));

    let message = client.delete_project(ADMIN_CODE, &a.id).await?;
    assert_eq!(message, "Project deleted successfully");
    assert_eq!(client.verify_admin(ADMIN_CODE).await?.len(), 1);

    let message = client.clear_projects(ADMIN_CODE).await?;
    assert_eq!(message, "All projects cleared successfully");
    assert!(client.verify_admin(ADMIN_CODE).await?.is_empty());

    let status = client.status().await?;
    assert_eq!(status["storage"], "memory");
    Ok(())
}
