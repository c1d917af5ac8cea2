use std::sync::Arc;

use common::config::DashboardConfig;
use common::hours::Weekday;
use common::image::{ImageKind, UploadFile};
use common::link::LinkItem;
use common::product::ProductForm;
use serde_json::{Value, json};

use super::*;
use crate::backend::local::Seed;
use crate::backend::{
    AuthProvider, AuthUser, Collaborators, LocalBackend, MemoryObjectStore, TableStore,
};
use crate::notify::testing::RecordingNotifier;

const BUCKET: &str = "company-images";

struct Harness {
    dashboard: Dashboard,
    backend: Arc<LocalBackend>,
    objects: Arc<MemoryObjectStore>,
    notifier: Arc<RecordingNotifier>,
}

fn seed() -> Seed {
    serde_json::from_value(json!({
        "tables": {
            "companies": [{
                "id": "c1", "user_id": "u1", "slug": "techcali",
                "company_name": "TechCali Solutions", "category": "empresa",
                "website": "https://techcali.co", "email": "hola@techcali.co",
                "social_links": {"instagram": "@techcali"},
                "selected_theme": "ocean-blue"
            }],
            "products": [
                {"id": "p1", "company_id": "c1", "name": "Website", "price": 100.0, "currency": "COP", "display_order": 0},
                {"id": "p2", "company_id": "c1", "name": "App", "price": 300.0, "currency": "COP", "display_order": 1}
            ],
            "company_images": [
                {"id": "img-logo", "company_id": "c1", "image_type": "logo", "image_url": "http://old/logo.png"}
            ],
            "reviews": [
                {"id": "r1", "company_id": "c1", "rating": 5, "author_name": "Ana", "is_approved": true,
                 "created_at": "2024-05-02T00:00:00Z"},
                {"id": "r2", "company_id": "c1", "rating": 2, "author_name": "Bo", "is_approved": false,
                 "created_at": "2024-05-01T00:00:00Z"}
            ],
            "business_hours": [
                {"id": "h-mon", "company_id": "c1", "day_of_week": 0, "open_time": "08:00", "close_time": "17:00"}
            ]
        }
    }))
    .unwrap()
}

async fn open(seed: Seed, user: Option<&str>, answer: bool) -> Result<Harness, LoadError> {
    let backend = Arc::new(LocalBackend::from_seed(seed));
    if let Some(id) = user {
        backend
            .sign_in_as(AuthUser {
                id: id.into(),
                email: None,
            })
            .await;
    }
    let objects = Arc::new(MemoryObjectStore::new("http://localhost:3000/storage"));
    let notifier = Arc::new(RecordingNotifier::answering(answer));
    let collaborators = Collaborators::new(backend.clone(), backend.clone(), objects.clone());
    let dashboard = Dashboard::load(
        collaborators,
        notifier.clone(),
        DashboardConfig::default(),
        BUCKET,
    )
    .await?;
    Ok(Harness {
        dashboard,
        backend,
        objects,
        notifier,
    })
}

async fn harness() -> Harness {
    open(seed(), Some("u1"), true).await.unwrap()
}

async fn harness_declining() -> Harness {
    open(seed(), Some("u1"), false).await.unwrap()
}

fn link_ids(links: &[LinkItem]) -> Vec<&str> {
    links.iter().map(|l| l.id.as_str()).collect()
}

async fn stored(backend: &LocalBackend, table: &str, id: &str) -> Option<Value> {
    backend
        .rows(table)
        .await
        .into_iter()
        .find(|row| row["id"] == id)
}

fn image(name: &str, content_type: &str, size: usize) -> UploadFile {
    UploadFile {
        file_name: name.into(),
        content_type: content_type.into(),
        bytes: vec![0; size],
    }
}

mod loading {
    use super::*;

    #[tokio::test]
    async fn no_session_redirects_to_login() {
        let err = open(seed(), None, true).await.err().unwrap();
        assert_eq!(err.redirect(), Some(Redirect::Login));
    }

    #[tokio::test]
    async fn account_without_company_redirects_to_setup() {
        let err = open(seed(), Some("u9"), true).await.err().unwrap();
        assert_eq!(err.redirect(), Some(Redirect::Setup));
    }

    #[tokio::test]
    async fn loads_company_lists_in_order() {
        let h = harness().await;
        let d = &h.dashboard;
        assert_eq!(d.company().slug, "techcali");
        assert_eq!(d.products().len(), 2);
        assert_eq!(d.reviews().items()[0].id, "r1");
        assert_eq!(d.hours().day(Weekday::try_from(0u8).unwrap()).describe(), "08:00 - 17:00");
        assert_eq!(d.theme().theme_id(), "ocean-blue");
        assert!(d.image_set().logo.is_some());
    }

    #[tokio::test]
    async fn links_are_derived_until_first_save() {
        let h = harness().await;
        assert_eq!(
            link_ids(h.dashboard.links().items()),
            ["social-instagram", "website", "email"]
        );
        assert!(h.dashboard.links().items().iter().all(|l| l.clicks == 0));
    }

    #[tokio::test]
    async fn null_columns_from_the_backend_still_load() {
        let seed: Seed = serde_json::from_value(json!({
            "tables": {
                "companies": [{
                    "id": "c1", "user_id": "u1", "slug": "techcali", "company_name": "TechCali",
                    "category": null, "services": null, "social_links": null, "links": null,
                    "website": null, "email": "hola@techcali.co", "updated_at": null
                }],
                "products": [
                    {"id": "p1", "company_id": "c1", "name": "Kit", "price": 10.0, "currency": "COP",
                     "stock_quantity": null, "is_active": null, "views_count": null, "display_order": null}
                ],
                "reviews": [
                    {"id": "r1", "company_id": "c1", "rating": 4, "author_name": "Ana", "is_approved": null}
                ]
            }
        }))
        .unwrap();

        let h = open(seed, Some("u1"), true).await.unwrap();

        assert_eq!(link_ids(h.dashboard.links().items()), ["email"]);
        assert!(h.dashboard.products().get("p1").unwrap().is_active);
        assert_eq!(h.dashboard.review_summary().count, 0);
    }

    #[tokio::test]
    async fn failed_secondary_list_still_opens() {
        let backend = Arc::new(LocalBackend::from_seed(seed()));
        backend
            .sign_in_as(AuthUser {
                id: "u1".into(),
                email: None,
            })
            .await;
        backend.fail_table("products", true).await;
        let objects = Arc::new(MemoryObjectStore::new("http://x"));
        let dashboard = Dashboard::load(
            Collaborators::new(backend.clone(), backend.clone(), objects),
            Arc::new(RecordingNotifier::answering(true)),
            DashboardConfig::default(),
            BUCKET,
        )
        .await
        .unwrap();
        assert!(dashboard.products().is_empty());
        assert_eq!(dashboard.reviews().len(), 2);
    }
}

mod reload {
    use super::*;

    #[tokio::test]
    async fn reload_replaces_local_state_with_stored_rows() {
        let mut h = harness().await;
        assert!(h.dashboard.toggle_link("email"));
        h.dashboard.select_theme("ruby-red");
        h.backend
            .insert(
                "products",
                json!({"company_id": "c1", "name": "Hosting", "price": 50.0,
                       "currency": "COP", "display_order": 2}),
            )
            .await
            .unwrap();
        h.backend
            .update("reviews", "r2", json!({"is_approved": true}))
            .await
            .unwrap();

        h.dashboard.reload().await.unwrap();

        let d = &h.dashboard;
        assert!(d.links().items().iter().all(|l| l.is_active));
        assert_eq!(d.theme().theme_id(), "ocean-blue");
        assert_eq!(d.products().len(), 3);
        assert_eq!(d.products().items()[2].name, "Hosting");
        assert_eq!(d.review_summary().count, 2);
        assert!(h.notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_current_state() {
        let mut h = harness().await;
        assert!(h.dashboard.toggle_link("email"));
        h.backend.fail_table("companies", true).await;

        let err = h.dashboard.reload().await.unwrap_err();

        assert!(matches!(err, ActionError::Backend(_)));
        assert!(!h.dashboard.links().items()[2].is_active);
        assert_eq!(h.dashboard.products().len(), 2);
        assert_eq!(
            h.notifier.alerts(),
            ["Could not reload the dashboard. Please try again."]
        );
    }
}

mod links {
    use super::*;

    #[tokio::test]
    async fn drag_persists_final_order() {
        let mut h = harness().await;
        let d = &mut h.dashboard;

        assert!(d.begin_link_drag(0));
        assert!(d.link_drag_over(1));
        assert!(d.link_drag_over(2));
        assert!(d.end_link_drag().await.unwrap());

        assert_eq!(
            link_ids(d.links().items()),
            ["website", "email", "social-instagram"]
        );
        let row = stored(&h.backend, "companies", "c1").await.unwrap();
        let saved: Vec<LinkItem> = serde_json::from_value(row["links"].clone()).unwrap();
        assert_eq!(link_ids(&saved), ["website", "email", "social-instagram"]);
        assert_eq!(d.company().links.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn ending_without_drag_sends_nothing() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;
        assert!(!h.dashboard.end_link_drag().await.unwrap());
        assert_eq!(h.backend.request_count().await, before);
    }

    #[tokio::test]
    async fn same_index_and_out_of_range_moves_send_nothing() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;

        assert!(!h.dashboard.move_link(0, 99).await.unwrap());
        assert!(!h.dashboard.move_link(1, 1).await.unwrap());
        assert!(!h.dashboard.move_link(7, 0).await.unwrap());

        assert_eq!(h.backend.request_count().await, before);
        assert_eq!(
            link_ids(h.dashboard.links().items()),
            ["social-instagram", "website", "email"]
        );
        assert!(!h.dashboard.link_drag_over(0));
        assert_eq!(h.dashboard.company().links, None);
    }

    #[tokio::test]
    async fn failed_save_keeps_local_order_and_alerts() {
        let mut h = harness().await;
        h.backend.fail_table("companies", true).await;

        let err = h.dashboard.move_link(2, 0).await.unwrap_err();

        assert!(matches!(err, ActionError::Backend(_)));
        assert_eq!(
            link_ids(h.dashboard.links().items()),
            ["email", "social-instagram", "website"]
        );
        assert_eq!(h.dashboard.company().links, None);
        assert_eq!(h.notifier.alerts(), ["Could not save your links. Please try again."]);
    }

    #[tokio::test]
    async fn local_edits_stay_local_until_saved() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;
        let d = &mut h.dashboard;

        assert!(d.toggle_link("email"));
        let draft = d.start_link_edit("website").unwrap();
        assert_eq!(draft.url, "https://techcali.co");
        assert!(d.commit_link_edit("website", "Site", "https://techcali.com"));
        let copy = d.duplicate_link("website").unwrap();
        assert_eq!(copy.title, "Site (copy)");
        d.remove_link("social-instagram").unwrap();

        assert_eq!(h.backend.request_count().await, before);

        h.dashboard.save_links().await.unwrap();
        let row = stored(&h.backend, "companies", "c1").await.unwrap();
        assert_eq!(row["links"].as_array().map(Vec::len), Some(3));
        assert_eq!(row["links"][1]["is_active"], false);
    }

    #[tokio::test]
    async fn declined_removal_keeps_link() {
        let mut h = harness_declining().await;
        let err = h.dashboard.remove_link("email").unwrap_err();
        assert!(matches!(err, ActionError::Cancelled));
        assert_eq!(h.dashboard.links().len(), 3);
        assert!(h.notifier.alerts().is_empty());
        assert_eq!(h.notifier.prompts(), ["Delete the link \"Email\"?"]);
    }
}

mod products {
    use super::*;

    fn form(name: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.into(),
            price: price.into(),
            ..ProductForm::default()
        }
    }

    #[tokio::test]
    async fn create_appends_backend_row() {
        let mut h = harness().await;
        let product = h
            .dashboard
            .save_product(&form("Hosting", "50000"), None)
            .await
            .unwrap();

        assert_eq!(product.currency, "COP");
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(h.dashboard.products().len(), 3);
        assert!(stored(&h.backend, "products", &product.id).await.is_some());
        assert_eq!(h.notifier.alerts(), ["Product created!"]);
    }

    #[tokio::test]
    async fn update_patches_by_id() {
        let mut h = harness().await;
        let updated = h
            .dashboard
            .save_product(&form("Website Pro", "150"), Some("p1"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Website Pro");
        assert_eq!(h.dashboard.products().get("p1").unwrap().price, 150.0);
        assert_eq!(h.dashboard.products().get("p2").unwrap().name, "App");
        let row = stored(&h.backend, "products", "p1").await.unwrap();
        assert_eq!(row["name"], "Website Pro");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;

        let err = h
            .dashboard
            .save_product(&form("Hosting", "cheap"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(h.backend.request_count().await, before);
        assert_eq!(h.dashboard.products().len(), 2);
        assert_eq!(h.notifier.alerts().len(), 1);
    }

    #[tokio::test]
    async fn toggle_flips_visibility() {
        let mut h = harness().await;
        assert!(!h.dashboard.toggle_product("p2").await.unwrap());
        assert!(!h.dashboard.products().get("p2").unwrap().is_active);
        let row = stored(&h.backend, "products", "p2").await.unwrap();
        assert_eq!(row["is_active"], false);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let mut h = harness().await;
        h.backend.fail_table("products", true).await;

        let err = h.dashboard.delete_product("p1").await.unwrap_err();

        assert!(matches!(err, ActionError::Backend(_)));
        assert_eq!(h.dashboard.products().len(), 2);
        assert_eq!(
            h.notifier.alerts(),
            ["Could not delete the product. Please try again."]
        );
    }

    #[tokio::test]
    async fn declined_delete_makes_no_call() {
        let mut h = harness_declining().await;
        let before = h.backend.request_count().await;

        let err = h.dashboard.delete_product("p1").await.unwrap_err();

        assert!(matches!(err, ActionError::Cancelled));
        assert_eq!(h.backend.request_count().await, before);
        assert!(h.dashboard.products().contains("p1"));
    }

    #[tokio::test]
    async fn confirmed_delete_removes_locally_and_remotely() {
        let mut h = harness().await;
        let removed = h.dashboard.delete_product("p2").await.unwrap();
        assert_eq!(removed.name, "App");
        assert!(!h.dashboard.products().contains("p2"));
        assert!(stored(&h.backend, "products", "p2").await.is_none());
    }
}

mod images {
    use super::*;

    #[tokio::test]
    async fn oversized_upload_is_rejected_before_any_call() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;

        let err = h
            .dashboard
            .upload_image(ImageKind::Cover, image("cover.jpg", "image/jpeg", 6 * 1024 * 1024))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ActionError::Validation(common::error::ValidationError::FileTooLarge { .. })
        ));
        assert_eq!(h.backend.request_count().await, before);
        assert_eq!(h.objects.object_count().await, 0);
        assert_eq!(h.dashboard.uploading(), None);
        assert_eq!(h.notifier.alerts().len(), 1);
    }

    #[tokio::test]
    async fn non_image_is_rejected() {
        let mut h = harness().await;
        let err = h
            .dashboard
            .upload_image(ImageKind::Gallery, image("notes.pdf", "application/pdf", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(h.objects.object_count().await, 0);
    }

    #[tokio::test]
    async fn logo_upload_replaces_existing_record() {
        let mut h = harness().await;

        let logo = h
            .dashboard
            .upload_image(ImageKind::Logo, image("Logo.PNG", "image/png", 64))
            .await
            .unwrap();

        assert_eq!(logo.id, "img-logo");
        assert_eq!(h.dashboard.images().len(), 1);
        let key = logo.storage_path.clone().unwrap();
        assert!(key.starts_with("c1/logo-") && key.ends_with(".png"));
        assert_eq!(
            logo.image_url,
            format!("http://localhost:3000/storage/{BUCKET}/{key}")
        );
        assert!(h.objects.get(BUCKET, &key).await.is_some());
        let row = stored(&h.backend, "company_images", "img-logo").await.unwrap();
        assert_eq!(row["image_url"], logo.image_url.as_str());
        assert_eq!(h.notifier.alerts(), ["Logo updated successfully!"]);
    }

    #[tokio::test]
    async fn cover_and_gallery_uploads_insert() {
        let mut h = harness().await;
        let cover = h
            .dashboard
            .upload_image(ImageKind::Cover, image("cover.jpg", "image/jpeg", 64))
            .await
            .unwrap();
        assert_eq!(cover.alt_text.as_deref(), Some("Cover of TechCali Solutions"));

        for _ in 0..2 {
            h.dashboard
                .upload_image(ImageKind::Gallery, image("shot.webp", "image/webp", 64))
                .await
                .unwrap();
        }

        let set = h.dashboard.image_set();
        assert!(set.cover.is_some());
        assert_eq!(set.gallery.len(), 2);
        assert_eq!(h.backend.rows("company_images").await.len(), 4);
    }

    #[tokio::test]
    async fn delete_image_asks_first() {
        let mut h = harness().await;
        h.dashboard.delete_image("img-logo").await.unwrap();
        assert!(h.dashboard.images().is_empty());
        assert_eq!(h.notifier.prompts(), ["Delete this logo?"]);
    }
}

mod reviews {
    use super::*;

    #[tokio::test]
    async fn moderation_updates_summary() {
        let mut h = harness().await;
        assert_eq!(h.dashboard.review_summary().count, 1);

        h.dashboard.approve_review("r2").await.unwrap();
        let summary = h.dashboard.review_summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, 3.5);

        h.dashboard.hide_review("r1").await.unwrap();
        assert_eq!(h.dashboard.review_summary().average, 2.0);
        let row = stored(&h.backend, "reviews", "r1").await.unwrap();
        assert_eq!(row["is_approved"], false);
    }

    #[tokio::test]
    async fn unknown_review_is_reported() {
        let mut h = harness().await;
        let err = h.dashboard.approve_review("zzz").await.unwrap_err();
        assert!(matches!(err, ActionError::NotFound(_)));
        assert_eq!(h.notifier.alerts().len(), 1);
    }

    #[tokio::test]
    async fn delete_review_removes_it() {
        let mut h = harness().await;
        h.dashboard.delete_review("r2").await.unwrap();
        assert_eq!(h.dashboard.reviews().len(), 1);
        assert_eq!(h.notifier.prompts(), ["Delete the review by Bo?"]);
    }
}

mod hours {
    use super::*;

    fn day(index: u8) -> Weekday {
        Weekday::try_from(index).unwrap()
    }

    #[tokio::test]
    async fn first_save_inserts_then_updates_same_row() {
        let mut h = harness().await;
        let tuesday = day(1);

        h.dashboard.set_day_24_hours(tuesday, true).await.unwrap();
        let id = h.dashboard.hours().day(tuesday).id.clone().unwrap();
        assert_eq!(h.dashboard.hours().day(tuesday).describe(), "Open 24 hours");

        h.dashboard.set_day_closed(tuesday, true).await.unwrap();
        let saved = h.dashboard.hours().day(tuesday);
        assert_eq!(saved.id.as_deref(), Some(id.as_str()));
        assert!(saved.is_closed && !saved.is_24_hours);
        assert_eq!(h.backend.rows("business_hours").await.len(), 2);
    }

    #[tokio::test]
    async fn times_update_existing_day() {
        let mut h = harness().await;
        h.dashboard
            .set_day_times(day(0), "09:30", "18:00")
            .await
            .unwrap();
        assert_eq!(h.dashboard.hours().day(day(0)).describe(), "09:30 - 18:00");
        let row = stored(&h.backend, "business_hours", "h-mon").await.unwrap();
        assert_eq!(row["open_time"], "09:30");
    }

    #[tokio::test]
    async fn bad_time_is_rejected_locally() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;
        let err = h
            .dashboard
            .set_day_times(day(0), "9am", "18:00")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(h.backend.request_count().await, before);
        assert_eq!(h.dashboard.hours().day(day(0)).describe(), "08:00 - 17:00");
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_hours() {
        let mut h = harness().await;
        h.backend.fail_table("business_hours", true).await;
        assert!(h.dashboard.set_day_closed(day(0), true).await.is_err());
        assert!(!h.dashboard.hours().day(day(0)).is_closed);
    }
}

mod theme {
    use super::*;

    #[tokio::test]
    async fn save_persists_selection() {
        let mut h = harness().await;
        assert!(h.dashboard.select_theme("ruby-red"));
        h.dashboard.save_theme().await.unwrap();

        assert!(!h.dashboard.saving_theme());
        let row = stored(&h.backend, "companies", "c1").await.unwrap();
        assert_eq!(row["selected_theme"], "ruby-red");
        assert_eq!(row["custom_color"], "#EF4444");
        assert_eq!(h.dashboard.company().custom_color.as_deref(), Some("#EF4444"));
    }

    #[tokio::test]
    async fn invalid_custom_color_is_not_sent() {
        let mut h = harness().await;
        let before = h.backend.request_count().await;
        h.dashboard.set_custom_color("green");

        let err = h.dashboard.save_theme().await.unwrap_err();

        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(h.backend.request_count().await, before);
        assert_eq!(h.dashboard.company().selected_theme.as_deref(), Some("ocean-blue"));
    }
}

#[tokio::test]
async fn sign_out_ends_session() {
    let h = harness().await;
    let backend = h.backend.clone();
    h.dashboard.sign_out().await.unwrap();
    assert_eq!(backend.current_user().await.unwrap(), None);
}
