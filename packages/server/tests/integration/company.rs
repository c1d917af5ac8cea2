use crate::common::{TestApp, routes};

mod directory_search {
    use super::*;

    #[tokio::test]
    async fn without_query_lists_everything_alphabetically() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::COMPANIES).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 3);
        assert_eq!(
            res.slugs(),
            ["academia-andina", "ecoverde-cali", "techcali-solutions"]
        );
    }

    #[tokio::test]
    async fn query_matches_name_category_or_service() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::search("CALI")).await;
        assert_eq!(res.slugs(), ["ecoverde-cali", "techcali-solutions"]);

        let res = app.get(&routes::search("software")).await;
        assert_eq!(res.slugs(), ["academia-andina"]);

        let res = app.get(&routes::search("sustainability")).await;
        assert_eq!(res.slugs(), ["ecoverde-cali"]);
    }

    #[tokio::test]
    async fn entries_use_industry_as_category() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::search("mobile")).await;

        assert_eq!(res.body["total"], 1);
        assert_eq!(res.body["data"][0]["category"], "Technology");
        assert_eq!(res.body["data"][0]["name"], "TechCali Solutions");
    }

    #[tokio::test]
    async fn no_match_is_an_empty_list() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::search("bakery")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 0);
        assert!(res.slugs().is_empty());
    }
}

mod company_profile {
    use super::*;

    #[tokio::test]
    async fn profile_shows_public_data_only() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("techcali-solutions")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["company"]["company_name"], "TechCali Solutions");
        assert_eq!(res.body["category_label"], "Company");
        assert_eq!(res.body["primary_color"], "#123456");

        let products = res.body["products"].as_array().unwrap();
        let names: Vec<_> = products.iter().map(|p| p["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Mobile app", "Landing page"]);

        let reviews = res.body["reviews"].as_array().unwrap();
        let authors: Vec<_> = reviews.iter().map(|r| r["author_name"].as_str().unwrap()).collect();
        assert_eq!(authors, ["Luis", "Ana"]);
        assert_eq!(res.body["rating"]["count"], 2);
        assert_eq!(res.body["rating"]["average"], 4.0);
    }

    #[tokio::test]
    async fn profile_includes_images_and_week() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("techcali-solutions")).await;

        assert_eq!(res.body["images"]["cover"]["id"], "i1");
        assert!(res.body["images"]["logo"].is_null());
        assert_eq!(res.body["images"]["gallery"].as_array().unwrap().len(), 1);

        let days = res.body["hours"]["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["open_time"], "08:00");
        assert_eq!(days[5]["is_24_hours"], true);
        assert_eq!(days[6]["is_closed"], true);
    }

    #[tokio::test]
    async fn saved_links_are_returned_in_order() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("techcali-solutions")).await;

        let links = res.body["links"].as_array().unwrap();
        assert_eq!(links.len(), 1, "{links:?}");
        assert_eq!(links[0]["id"], "website");
        assert_eq!(links[0]["type"], "custom");
    }

    #[tokio::test]
    async fn inactive_links_and_owner_are_hidden() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("techcali-solutions")).await;

        assert!(!res.text.contains("old-shop"), "{}", res.text);
        assert!(res.body["company"].get("user_id").is_none());
        assert!(res.body["company"].get("links").is_none());
    }

    #[tokio::test]
    async fn unsaved_links_are_derived_from_contact_fields() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("ecoverde-cali")).await;

        assert_eq!(res.body["links"][0]["id"], "social-instagram");
        assert_eq!(res.body["links"][0]["url"], "https://instagram.com/ecoverde");
    }

    #[tokio::test]
    async fn null_columns_do_not_break_the_profile() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("academia-andina")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["links"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::company("nobody")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod backend_failures {
    use super::*;

    #[tokio::test]
    async fn unreachable_backend_is_bad_gateway() {
        let app = TestApp::spawn_unreachable().await;

        let res = app.get(routes::COMPANIES).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "BACKEND_UNAVAILABLE");
    }

    #[tokio::test]
    async fn landing_does_not_need_the_backend() {
        let app = TestApp::spawn_unreachable().await;

        let res = app.get(routes::LANDING).await;

        assert_eq!(res.status, 200);
    }
}
