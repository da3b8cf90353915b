use super::*;

fn cookie(name: &str, value: &str, domain: &str, path: &str) -> Cookie {
    Cookie {
        name: name.to_string(),
        value: value.to_string(),
        domain: domain.to_string(),
        path: path.to_string(),
        host_only: false,
    }
}

#[test]
fn finds_cookie_for_exact_host() {
    let jar = CookieJar::from_cookies(vec![
        cookie("sid", "00Dxx!abc", "acme.my.salesforce.com", "/"),
        cookie("sid", "other", "globex.my.salesforce.com", "/"),
    ]);
    let v = jar
        .get("https://acme.my.salesforce.com/001110000123456", "sid")
        .unwrap();
    assert_eq!(v.as_deref(), Some("00Dxx!abc"));
}

#[test]
fn domain_cookies_match_subdomains_on_label_boundary() {
    let jar = CookieJar::from_cookies(vec![cookie("sid", "shared", ".salesforce.com", "/")]);
    assert_eq!(
        jar.get("https://na42.salesforce.com/x", "sid").unwrap().as_deref(),
        Some("shared")
    );
    assert_eq!(jar.get("https://evilsalesforce.com/x", "sid").unwrap(), None);
}

#[test]
fn host_only_cookies_do_not_match_subdomains() {
    let mut c = cookie("sid", "v", "salesforce.com", "/");
    c.host_only = true;
    let jar = CookieJar::from_cookies(vec![c]);
    assert_eq!(jar.get("https://na42.salesforce.com/", "sid").unwrap(), None);
    assert_eq!(
        jar.get("https://salesforce.com/", "sid").unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn most_specific_path_wins() {
    let jar = CookieJar::from_cookies(vec![
        cookie("sid", "root", "acme.my.salesforce.com", "/"),
        cookie("sid", "apex", "acme.my.salesforce.com", "/apex"),
    ]);
    assert_eq!(
        jar.get("https://acme.my.salesforce.com/apex/Page", "sid")
            .unwrap()
            .as_deref(),
        Some("apex")
    );
    assert_eq!(
        jar.get("https://acme.my.salesforce.com/apexish", "sid")
            .unwrap()
            .as_deref(),
        Some("root")
    );
}

#[test]
fn unknown_name_is_none() {
    let jar = CookieJar::from_cookies(vec![cookie("oid", "x", "acme.my.salesforce.com", "/")]);
    assert_eq!(jar.get("https://acme.my.salesforce.com/", "sid").unwrap(), None);
}

#[test]
fn unparseable_url_is_an_error() {
    let jar = CookieJar::default();
    assert!(jar.get("not a url", "sid").is_err());
}

#[test]
fn open_reads_chrome_export_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cookies.json");
    std::fs::write(
        &path,
        br#"[{"name":"sid","value":"tok","domain":"acme.my.salesforce.com","path":"/","secure":true,"hostOnly":true,"session":true}]"#,
    )
    .unwrap();

    let jar = CookieJar::open(&path).unwrap();
    assert_eq!(
        jar.get("https://acme.my.salesforce.com/001", "sid")
            .unwrap()
            .as_deref(),
        Some("tok")
    );
    assert!(CookieJar::open(&tmp.path().join("missing.json")).is_err());
}
