//! Page discovery against a mock site

use a11y_sweep::config::{parse_config, ManualPaths, UserAgentConfig};
use a11y_sweep::discovery::build_http_client;
use a11y_sweep::{discover, DiscoveryOptions, DiscoveryStrategy};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    build_http_client(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build client")
}

fn options() -> DiscoveryOptions {
    DiscoveryOptions {
        crawl_delay: Duration::ZERO,
        robots_agent: "SweepBot".to_string(),
        ..DiscoveryOptions::default()
    }
}

fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("Failed to parse mock server URI")
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, route: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();

    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    format!(
                        "<html><head><title>{}</title></head><body>{}</body></html>",
                        route, anchors
                    ),
                    "text/html; charset=utf-8",
                ),
        )
        .mount(server)
        .await;
}

fn urlset(base: &str, paths: &[&str]) -> String {
    let entries: String = paths
        .iter()
        .map(|p| format!("<url><loc>{}{}</loc></url>", base, p))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

#[tokio::test]
async fn test_sitemap_index_flattens_children() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{0}/sitemap-pages.xml</loc></sitemap>
  <sitemap><loc>{0}/sitemap-blog.xml</loc></sitemap>
</sitemapindex>"#,
            base
        ),
    )
    .await;
    mount_xml(&server, "/sitemap-pages.xml", urlset(&base, &["/", "/about/", "/contact?ref=footer"])).await;
    mount_xml(
        &server,
        "/sitemap-blog.xml",
        urlset(&base, &["/blog/a", "/blog/b", "/blog/c", "/blog/d"]),
    )
    .await;

    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(
        pages,
        vec!["/", "/about", "/blog/a", "/blog/b", "/blog/c", "/blog/d", "/contact"]
    );
}

#[tokio::test]
async fn test_sitemap_drops_other_hosts() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut body = urlset(&base, &["/pricing"]);
    body = body.replace(
        "</urlset>",
        "<url><loc>https://cdn.elsewhere.test/pricing-assets</loc></url></urlset>",
    );
    mount_xml(&server, "/sitemap_index.xml", body).await;

    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/pricing"]);
}

#[tokio::test]
async fn test_sitemap_from_robots_directive() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nAllow: /\nSitemap: {}/custom/map.xml\n",
            base
        )))
        .mount(&server)
        .await;
    mount_xml(&server, "/custom/map.xml", urlset(&base, &["/docs", "/"])).await;

    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/docs"]);
}

#[tokio::test]
async fn test_missing_sitemap_falls_back_to_root() {
    let server = MockServer::start().await;

    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/"]);
}

#[tokio::test]
async fn test_crawl_follows_same_host_links_breadth_first() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        &[
            "/a",
            "/b",
            "/admin/settings",
            "/files/brochure.pdf",
            "mailto:team@example.com",
            "javascript:void(0)",
            "#main",
            "https://elsewhere.test/partner",
        ],
    )
    .await;
    mount_page(&server, "/a", &["/", "/b?tab=2"]).await;
    mount_page(&server, "/b", &["c", "/a#top"]).await;
    mount_page(&server, "/c", &["/a", "/missing"]).await;

    let strategy = DiscoveryStrategy::Crawl {
        seeds: vec!["/".to_string()],
    };
    let pages = discover(&client(), &base_url(&server), &strategy, &options())
        .await
        .expect("Discovery failed");

    // /missing 404s but is still recorded as visited
    assert_eq!(pages, vec!["/", "/a", "/b", "/c", "/missing"]);
}

#[tokio::test]
async fn test_crawl_respects_budget() {
    let server = MockServer::start().await;

    mount_page(&server, "/", &["/a", "/b", "/c"]).await;
    mount_page(&server, "/a", &["/d"]).await;

    let strategy = DiscoveryStrategy::Crawl {
        seeds: vec!["/".to_string()],
    };
    let options = DiscoveryOptions {
        crawl_budget: 2,
        ..options()
    };
    let pages = discover(&client(), &base_url(&server), &strategy, &options)
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/a"]);
}

#[tokio::test]
async fn test_crawl_honors_robots_disallow() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private\n"))
        .mount(&server)
        .await;
    mount_page(&server, "/", &["/private", "/public"]).await;
    mount_page(&server, "/private", &["/private/secret-only-link"]).await;
    mount_page(&server, "/public", &[]).await;

    let strategy = DiscoveryStrategy::Crawl {
        seeds: vec!["/".to_string()],
    };
    let pages = discover(&client(), &base_url(&server), &strategy, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/public"]);
}

#[tokio::test]
async fn test_max_pages_caps_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&base, &["/e", "/d", "/c", "/b", "/a", "/"]),
    )
    .await;

    let options = DiscoveryOptions {
        max_pages: 3,
        ..options()
    };
    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options)
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_paths_strategy_from_config() {
    let config = parse_config(
        r#"
[target]
base-url = "https://shop.example.com"

[discovery]
strategy = "paths"
paths = "/\n/about\n\n# comment\n/contact"
"#,
    )
    .expect("Failed to parse config");

    let strategy = DiscoveryStrategy::from_config(&config.discovery);
    assert_eq!(
        strategy,
        DiscoveryStrategy::Manual {
            paths: ManualPaths::Text("/\n/about\n\n# comment\n/contact".to_string())
        }
    );

    let base = Url::parse(&config.target.base_url).unwrap();
    let options = DiscoveryOptions::from_config(&config.discovery, &config.user_agent);
    let pages = discover(&client(), &base, &strategy, &options)
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/about", "/contact"]);
}

fn sitemap_index(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

#[tokio::test]
async fn test_sitemap_index_nesting_stops_at_max_depth() {
    let server = MockServer::start().await;
    let base = server.uri();

    // depth 0 -> depth 1 -> depth 2 index, whose children are never fetched
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/pages-top.xml", base), format!("{}/level1.xml", base)]),
    )
    .await;
    mount_xml(&server, "/pages-top.xml", urlset(&base, &["/shallow"])).await;
    mount_xml(
        &server,
        "/level1.xml",
        sitemap_index(&[format!("{}/level2.xml", base), format!("{}/pages-mid.xml", base)]),
    )
    .await;
    mount_xml(&server, "/pages-mid.xml", urlset(&base, &["/mid"])).await;
    mount_xml(
        &server,
        "/level2.xml",
        sitemap_index(&[format!("{}/pages-deep.xml", base)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/pages-deep.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&base, &["/deep"])))
        .expect(0)
        .mount(&server)
        .await;

    let options = DiscoveryOptions {
        max_sitemap_depth: 2,
        ..options()
    };
    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options)
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/mid", "/shallow"]);
}

#[tokio::test]
async fn test_self_referencing_sitemap_index_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&[
            format!("{}/sitemap.xml", base),
            format!("{}/pages.xml", base),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&base, &["/", "/team"])))
        .expect(1)
        .mount(&server)
        .await;

    let pages = discover(&client(), &base_url(&server), &DiscoveryStrategy::Sitemap, &options())
        .await
        .expect("Discovery failed");

    assert_eq!(pages, vec!["/", "/team"]);
}
