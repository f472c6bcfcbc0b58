//! Tests for the showcase domain operations against a mock GitHub upstream
//!
//! Every test points a [`GithubClient`] at a mockito server so the suite runs
//! without network access or a token.

use mockito::{Mock, ServerGuard};
use serde_json::{Value, json};

use gitfolio::github::GithubClient;
use gitfolio::showcase::{ShowcaseService, SortKey};

const ACCOUNT: &str = "octocat";

fn service_for(server: &ServerGuard) -> ShowcaseService {
    let client = GithubClient::with_base_url(server.url(), None);
    ShowcaseService::new(client, ACCOUNT)
}

fn repo_object(name: &str, fork: bool, stars: u64, language: Option<&str>, topics: &[&str]) -> Value {
    json!({
        "name": name,
        "full_name": format!("{ACCOUNT}/{name}"),
        "description": format!("{name} description"),
        "fork": fork,
        "html_url": format!("https://github.com/{ACCOUNT}/{name}"),
        "stargazers_count": stars,
        "forks_count": 1,
        "language": language,
        "topics": topics,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z",
        "pushed_at": "2024-06-01T00:00:00Z",
    })
}

async fn mock_repo_list(server: &mut ServerGuard, repos: Value) -> Mock {
    server
        .mock(
            "GET",
            format!("/users/{ACCOUNT}/repos?per_page=100&sort=updated").as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repos.to_string())
        .create_async()
        .await
}

fn parse_names(output: &str) -> Vec<String> {
    let parsed: Vec<Value> = serde_json::from_str(output).expect("output should be a JSON array");
    parsed
        .iter()
        .map(|repo| repo["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn list_repos_excludes_forks_by_default() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("original", false, 5, Some("Rust"), &[]),
            repo_object("forked", true, 50, Some("Go"), &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service
        .list_repositories(false, SortKey::Updated)
        .await
        .expect("listing should succeed");

    assert_eq!(parse_names(&output), vec!["original"]);
}

#[tokio::test]
async fn list_repos_with_forks_is_a_superset() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("original", false, 5, Some("Rust"), &[]),
            repo_object("forked", true, 50, Some("Go"), &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let without = parse_names(
        &service
            .list_repositories(false, SortKey::Updated)
            .await
            .unwrap(),
    );
    let with = parse_names(
        &service
            .list_repositories(true, SortKey::Updated)
            .await
            .unwrap(),
    );

    assert!(without.iter().all(|name| with.contains(name)));
    assert!(with.contains(&"forked".to_string()));
}

#[tokio::test]
async fn list_repos_sorts_by_stars_descending() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("mid", false, 10, None, &[]),
            repo_object("low", false, 1, None, &[]),
            repo_object("high", false, 99, None, &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service
        .list_repositories(false, SortKey::Stars)
        .await
        .unwrap();

    assert_eq!(parse_names(&output), vec!["high", "mid", "low"]);
}

#[tokio::test]
async fn list_repos_sorts_by_name_case_insensitively() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("zeta", false, 0, None, &[]),
            repo_object("Alpha", false, 0, None, &[]),
            repo_object("beta", false, 0, None, &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service
        .list_repositories(false, SortKey::Name)
        .await
        .unwrap();

    assert_eq!(parse_names(&output), vec!["Alpha", "beta", "zeta"]);
}

#[tokio::test]
async fn list_repos_default_sort_preserves_upstream_order() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("newest", false, 0, None, &[]),
            repo_object("older", false, 100, None, &[]),
            repo_object("oldest", false, 50, None, &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service
        .list_repositories(false, SortKey::Updated)
        .await
        .unwrap();

    assert_eq!(parse_names(&output), vec!["newest", "older", "oldest"]);
}

#[tokio::test]
async fn repeated_calls_produce_identical_output() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("a", false, 3, Some("Rust"), &["cli"]),
            repo_object("b", false, 3, Some("Go"), &["cli"]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let first = service
        .list_repositories(true, SortKey::Stars)
        .await
        .unwrap();
    let second = service
        .list_repositories(true, SortKey::Stars)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn repo_details_includes_readme_content() {
    let mut server = mockito::Server::new_async().await;
    let _repo = server
        .mock("GET", format!("/repos/{ACCOUNT}/gitfolio").as_str())
        .with_status(200)
        .with_body(repo_object("gitfolio", false, 7, Some("Rust"), &["mcp"]).to_string())
        .create_async()
        .await;
    let _readme = server
        .mock("GET", format!("/repos/{ACCOUNT}/gitfolio/readme").as_str())
        .with_status(200)
        .with_body("# Gitfolio\n\nShowcase server.")
        .create_async()
        .await;

    let service = service_for(&server);
    let output = service.repository_details("gitfolio").await.unwrap();

    assert!(output.starts_with("# gitfolio\n"));
    assert!(output.contains("\"full_name\": \"octocat/gitfolio\""));
    assert!(output.contains("## README"));
    assert!(output.contains("# Gitfolio\n\nShowcase server."));
}

#[tokio::test]
async fn repo_details_substitutes_placeholder_when_readme_is_missing() {
    let mut server = mockito::Server::new_async().await;
    let _repo = server
        .mock("GET", format!("/repos/{ACCOUNT}/bare").as_str())
        .with_status(200)
        .with_body(repo_object("bare", false, 0, None, &[]).to_string())
        .create_async()
        .await;
    let _readme = server
        .mock("GET", format!("/repos/{ACCOUNT}/bare/readme").as_str())
        .with_status(404)
        .with_body(json!({"message": "Not Found"}).to_string())
        .create_async()
        .await;

    let service = service_for(&server);
    let output = service
        .repository_details("bare")
        .await
        .expect("missing README must not fail the call");

    let readme_section = output
        .split("## README\n\n")
        .nth(1)
        .expect("output should contain a README section");
    assert_eq!(readme_section, "(No README found)");
}

#[tokio::test]
async fn repo_details_propagates_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    let _repo = server
        .mock("GET", format!("/repos/{ACCOUNT}/missing").as_str())
        .with_status(404)
        .with_body(json!({"message": "Not Found"}).to_string())
        .create_async()
        .await;

    let service = service_for(&server);
    let err = service
        .repository_details("missing")
        .await
        .expect_err("a missing repository must propagate");

    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn languages_reports_percentages_that_sum_to_one_hundred() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/repos/{ACCOUNT}/mixed/languages").as_str())
        .with_status(200)
        .with_body(json!({"Rust": 7500, "Shell": 1500, "Dockerfile": 1000}).to_string())
        .create_async()
        .await;

    let service = service_for(&server);
    let output = service.languages("mixed").await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&output).unwrap();

    assert_eq!(entries.len(), 3);
    let total: f64 = entries
        .iter()
        .map(|entry| {
            entry["percentage"]
                .as_str()
                .unwrap()
                .trim_end_matches('%')
                .parse::<f64>()
                .unwrap()
        })
        .sum();
    assert!((total - 100.0).abs() < 0.2, "percentages summed to {total}");

    let rust = entries
        .iter()
        .find(|entry| entry["language"] == "Rust")
        .unwrap();
    assert_eq!(rust["bytes"], 7500);
    assert_eq!(rust["percentage"], "75.0%");
}

#[tokio::test]
async fn languages_uses_zero_literal_when_total_is_zero() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/repos/{ACCOUNT}/empty/languages").as_str())
        .with_status(200)
        .with_body(json!({"Rust": 0, "Go": 0}).to_string())
        .create_async()
        .await;

    let service = service_for(&server);
    let output = service.languages("empty").await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&output).unwrap();

    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["percentage"], "0%");
    }
}

#[tokio::test]
async fn profile_projects_user_fields() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/users/{ACCOUNT}").as_str())
        .with_status(200)
        .with_body(
            json!({
                "login": ACCOUNT,
                "name": "The Octocat",
                "bio": null,
                "location": "San Francisco",
                "company": "@github",
                "blog": "https://github.blog",
                "avatar_url": "https://avatars.githubusercontent.com/u/583231",
                "html_url": "https://github.com/octocat",
                "public_repos": 8,
                "followers": 1000,
                "following": 9,
            })
            .to_string(),
        )
        .create_async()
        .await;

    let service = service_for(&server);
    let output = service.profile().await.unwrap();
    let profile: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(profile["login"], ACCOUNT);
    assert_eq!(profile["display_name"], "The Octocat");
    assert_eq!(profile["bio"], Value::Null);
    assert_eq!(profile["website_url"], "https://github.blog");
    assert_eq!(profile["profile_url"], "https://github.com/octocat");
    assert_eq!(profile["public_repos"], 8);
}

#[tokio::test]
async fn search_matches_topics_and_includes_forks() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("dotfiles", false, 0, Some("Shell"), &["homelab"]),
            repo_object("forked-tool", true, 0, Some("Go"), &["HomeLab"]),
            repo_object("unrelated", false, 0, None, &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service.search_repositories("homelab").await.unwrap();
    let matches: Vec<Value> = serde_json::from_str(&output).unwrap();

    let names: Vec<&str> = matches
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["dotfiles", "forked-tool"]);
}

#[tokio::test]
async fn search_without_matches_returns_exact_sentence() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([repo_object("dotfiles", false, 0, Some("Shell"), &[])]),
    )
    .await;

    let service = service_for(&server);
    let output = service.search_repositories("xyz-no-match").await.unwrap();

    assert_eq!(output, "No repositories matched \"xyz-no-match\".");
}

#[tokio::test]
async fn tech_stack_counts_only_original_repos() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("a", false, 0, Some("Go"), &["cli"]),
            repo_object("b", true, 0, Some("Go"), &["cli"]),
            repo_object("c", false, 0, Some("Rust"), &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service.tech_stack_summary().await.unwrap();
    let summary: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(summary["total_original_repos"], 2);

    let languages = summary["languages"].as_array().unwrap();
    let mut language_counts: Vec<(&str, u64)> = languages
        .iter()
        .map(|entry| {
            (
                entry["language"].as_str().unwrap(),
                entry["count"].as_u64().unwrap(),
            )
        })
        .collect();
    language_counts.sort();
    assert_eq!(language_counts, vec![("Go", 1), ("Rust", 1)]);

    let topics = summary["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0]["topic"], "cli");
    assert_eq!(topics[0]["count"], 1);
}

#[tokio::test]
async fn tech_stack_sorts_counts_descending_without_zero_entries() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_repo_list(
        &mut server,
        json!([
            repo_object("one", false, 0, Some("Rust"), &["mcp", "cli"]),
            repo_object("two", false, 0, Some("Rust"), &["cli"]),
            repo_object("three", false, 0, Some("TypeScript"), &["cli"]),
            repo_object("four", false, 0, None, &[]),
        ]),
    )
    .await;

    let service = service_for(&server);
    let output = service.tech_stack_summary().await.unwrap();
    let summary: Value = serde_json::from_str(&output).unwrap();

    let languages = summary["languages"].as_array().unwrap();
    assert_eq!(languages[0]["language"], "Rust");
    assert_eq!(languages[0]["count"], 2);
    assert_eq!(languages[1]["language"], "TypeScript");
    assert_eq!(languages[1]["count"], 1);

    let topics = summary["topics"].as_array().unwrap();
    assert_eq!(topics[0]["topic"], "cli");
    assert_eq!(topics[0]["count"], 3);
    assert_eq!(topics[1]["topic"], "mcp");
    assert_eq!(topics[1]["count"], 1);

    for entry in languages.iter().chain(topics.iter()) {
        assert!(entry["count"].as_u64().unwrap() > 0);
    }
}

#[tokio::test]
async fn upstream_error_carries_status_and_path() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            format!("/users/{ACCOUNT}/repos?per_page=100&sort=updated").as_str(),
        )
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let service = service_for(&server);
    let err = service
        .list_repositories(false, SortKey::Updated)
        .await
        .expect_err("a 500 must propagate");

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains(&format!("/users/{ACCOUNT}/repos")));
}
