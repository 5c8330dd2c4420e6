//! Row orchestration driven through in-memory collaborators.

use async_trait::async_trait;
use lead_enrich_core::{
    convert_companies, convert_single, enrich_contacts, guess_bulk, guess_from_profiles,
    guess_single, guess_single_profile, write_rows, AppError, CollaboratorError, CompanyMatch,
    Config, DomainInput, DomainResolver, EmailVerifier, EnrichmentInput, LeadEnricher,
    PatternInput, ProfileInput, ProfileScraper, TableFormat, VerificationStatus, NOT_FOUND,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Resolver answering from a fixed table; names listed in `failing` error out.
#[derive(Default)]
struct StubResolver {
    companies: HashMap<String, CompanyMatch>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubResolver {
    fn with(mut self, query: &str, name: &str, domain: &str) -> Self {
        self.companies.insert(
            query.to_string(),
            CompanyMatch {
                resolved_name: Some(name.to_string()),
                domain: domain.to_string(),
                logo_url: Some(format!("https://logo.example/{}", domain)),
                linkedin: Some(format!("https://www.linkedin.com/company/{}", name.to_lowercase())),
                twitter: None,
                facebook: None,
            },
        );
        self
    }

    /// Registers a match that carries a domain but no company name.
    fn nameless(mut self, query: &str, domain: &str) -> Self {
        self.companies.insert(
            query.to_string(),
            CompanyMatch {
                domain: domain.to_string(),
                ..Default::default()
            },
        );
        self
    }

    fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainResolver for StubResolver {
    async fn resolve(&self, company_name: &str) -> Result<Option<CompanyMatch>, CollaboratorError> {
        self.calls.lock().unwrap().push(company_name.to_string());
        if self.failing.iter().any(|f| f == company_name) {
            return Err(CollaboratorError::Status(503));
        }
        Ok(self.companies.get(company_name).cloned())
    }
}

/// Verifier that marks `first.last` addresses valid and everything else unknown.
#[derive(Default)]
struct StubVerifier {
    unreachable: bool,
}

#[async_trait]
impl EmailVerifier for StubVerifier {
    async fn verify(&self, email: &str) -> Result<VerificationStatus, CollaboratorError> {
        if self.unreachable {
            return Err(CollaboratorError::MissingKey("email verifier"));
        }
        let local = email.split('@').next().unwrap_or_default();
        if local.contains('.') {
            Ok(VerificationStatus::Valid)
        } else {
            Ok(VerificationStatus::Unknown)
        }
    }
}

#[derive(Default)]
struct StubScraper {
    companies: HashMap<String, String>,
}

impl StubScraper {
    fn with(mut self, url: &str, company: &str) -> Self {
        self.companies.insert(url.to_string(), company.to_string());
        self
    }
}

#[async_trait]
impl ProfileScraper for StubScraper {
    async fn scrape_company(&self, profile_url: &str) -> Result<Option<String>, CollaboratorError> {
        if profile_url.contains("broken") {
            return Err(CollaboratorError::Status(999));
        }
        Ok(self.companies.get(profile_url).cloned())
    }
}

fn test_config() -> Config {
    Config {
        courtesy_delay: Duration::ZERO,
        ..Config::default()
    }
}

fn enricher(resolver: StubResolver, verifier: StubVerifier, scraper: StubScraper) -> LeadEnricher {
    LeadEnricher::with_collaborators(
        &test_config(),
        Arc::new(resolver),
        Arc::new(verifier),
        Arc::new(scraper),
    )
}

fn enrichment_input(company: &str, first: &str, last: &str) -> EnrichmentInput {
    EnrichmentInput {
        company: company.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

#[tokio::test]
async fn test_enrich_one_row_per_input_with_sentinels() {
    let resolver = StubResolver::default()
        .with("Acme Inc", "Acme", "acme.com")
        .failing_on("Flaky");
    let enricher = enricher(resolver, StubVerifier::default(), StubScraper::default());

    let rows = vec![
        enrichment_input("Acme Inc", "John", "Doe"),
        enrichment_input("Nobody", "Jane", "Roe"),
        enrichment_input("Flaky", "Sam", "Poe"),
    ];
    let mut progress = Vec::new();
    let results = enrich_contacts(&enricher, &rows, |done| progress.push(done)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(progress, vec![1, 2, 3]);

    assert_eq!(results[0].company, "Acme Inc");
    assert_eq!(results[0].domain, "acme.com");
    assert_eq!(results[0].guessed_email, "john.doe@acme.com");
    assert_eq!(results[0].validation_status, Some(VerificationStatus::Valid));

    for miss in &results[1..] {
        assert_eq!(miss.domain, NOT_FOUND);
        assert_eq!(miss.guessed_email, "");
        assert_eq!(miss.validation_status, None);
    }
}

#[tokio::test]
async fn test_enrich_unreachable_verifier_reports_invalid() {
    let resolver = StubResolver::default().with("Acme", "Acme", "acme.com");
    let enricher = enricher(
        resolver,
        StubVerifier { unreachable: true },
        StubScraper::default(),
    );
    let results = enrich_contacts(&enricher, &[enrichment_input("Acme", "A", "B")], |_| {}).await;
    assert_eq!(results[0].validation_status, Some(VerificationStatus::Invalid));
}

#[tokio::test]
async fn test_enrich_is_idempotent() {
    let build = || {
        enricher(
            StubResolver::default().with("Acme", "Acme", "acme.com"),
            StubVerifier::default(),
            StubScraper::default(),
        )
    };
    let rows = vec![
        enrichment_input("Acme", "John", "Doe"),
        enrichment_input("Missing", "Jane", "Roe"),
    ];

    let mut first = Vec::new();
    let mut second = Vec::new();
    write_rows(&enrich_contacts(&build(), &rows, |_| {}).await, &mut first, TableFormat::Csv).unwrap();
    write_rows(&enrich_contacts(&build(), &rows, |_| {}).await, &mut second, TableFormat::Csv).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_convert_single_normalizes_and_scores() {
    let resolver = StubResolver::default().with("acme", "Acme", "acme.com");
    let enricher = enricher(resolver, StubVerifier::default(), StubScraper::default());

    let candidate = convert_single(&enricher, "  ACME Inc  ").await.unwrap();
    assert_eq!(candidate.domain, "acme.com");
    assert_eq!(candidate.resolved_name.as_deref(), Some("Acme"));
    assert_eq!(candidate.confidence, 100);
}

#[tokio::test]
async fn test_convert_single_miss_and_blank_input() {
    let enricher = enricher(
        StubResolver::default(),
        StubVerifier::default(),
        StubScraper::default(),
    );
    assert!(matches!(
        convert_single(&enricher, "Unknown Ltd").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        convert_single(&enricher, "   ").await,
        Err(AppError::MalformedInput(_))
    ));
}

#[tokio::test]
async fn test_convert_bulk_keeps_every_row() {
    let resolver = Arc::new(
        StubResolver::default()
            .with("globex", "Globex Corporation", "globex.com")
            .failing_on("initech"),
    );
    let enricher = LeadEnricher::with_collaborators(
        &test_config(),
        resolver.clone(),
        Arc::new(StubVerifier::default()),
        Arc::new(StubScraper::default()),
    );

    let rows: Vec<DomainInput> = ["Globex", "Initech LLC", "Hooli"]
        .iter()
        .map(|c| DomainInput {
            company: c.to_string(),
        })
        .collect();
    let results = convert_companies(&enricher, &rows, |_| {}).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].company, "Globex Corporation");
    assert_eq!(results[0].domain, "globex.com");
    assert!(results[0].confidence > 0 && results[0].confidence < 100);
    assert_eq!(results[0].linkedin, "https://www.linkedin.com/company/globex corporation");

    assert_eq!(results[1].company, "Initech LLC");
    assert_eq!(results[1].domain, NOT_FOUND);
    assert_eq!(results[1].confidence, 0);
    assert_eq!(results[2].domain, NOT_FOUND);

    assert_eq!(resolver.calls(), vec!["globex", "initech", "hooli"]);
}

#[tokio::test]
async fn test_convert_nameless_match_keeps_raw_company() {
    let resolver = StubResolver::default().nameless("acme", "acme.com");
    let enricher = enricher(resolver, StubVerifier::default(), StubScraper::default());

    let rows = vec![DomainInput {
        company: "Acme Inc".to_string(),
    }];
    let results = convert_companies(&enricher, &rows, |_| {}).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].company, "Acme Inc");
    assert_eq!(results[0].domain, "acme.com");
    assert_eq!(results[0].confidence, 0);

    let candidate = convert_single(&enricher, "Acme Inc").await.unwrap();
    assert_eq!(candidate.resolved_name, None);
    assert_eq!(candidate.display_name("Acme Inc"), "Acme Inc");
}

#[tokio::test(start_paused = true)]
async fn test_convert_bulk_waits_between_lookups() {
    let config = Config {
        courtesy_delay: Duration::from_millis(300),
        ..Config::default()
    };
    let enricher = LeadEnricher::with_collaborators(
        &config,
        Arc::new(StubResolver::default()),
        Arc::new(StubVerifier::default()),
        Arc::new(StubScraper::default()),
    );
    let rows = vec![DomainInput::default(); 3];

    let started = tokio::time::Instant::now();
    convert_companies(&enricher, &rows, |_| {}).await;
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[test]
fn test_guess_single_requires_all_fields() {
    assert_eq!(
        guess_single("acme.com", "John", "Doe").unwrap(),
        vec![
            "john@acme.com",
            "doe@acme.com",
            "john.doe@acme.com",
            "johndoe@acme.com",
            "jdoe@acme.com",
            "doej@acme.com",
        ]
    );
    assert!(matches!(
        guess_single("acme.com", "", "Doe"),
        Err(AppError::MalformedInput(_))
    ));
    assert!(matches!(
        guess_single(" ", "John", "Doe"),
        Err(AppError::MalformedInput(_))
    ));
}

#[test]
fn test_guess_bulk_skips_incomplete_rows() {
    let row = |d: &str, f: &str, l: &str| PatternInput {
        domain: d.to_string(),
        first_name: f.to_string(),
        last_name: l.to_string(),
    };
    let rows = vec![
        row("acme.com", "John", "Doe"),
        row("", "Jane", "Roe"),
        row("globex.com", "", "Smith"),
        row("initech.com", "Peter", ""),
        row("hooli.com", "Gavin", "Belson"),
    ];
    let results = guess_bulk(&rows);

    assert_eq!(results.len(), 6 * 2);
    assert!(results[..6].iter().all(|r| r.domain == "acme.com" && r.first_name == "John"));
    assert_eq!(results[6].guessed_email, "gavin@hooli.com");
    assert_eq!(results[11].guessed_email, "belsong@hooli.com");
}

#[test]
fn test_guess_bulk_empty_csv_keeps_header() {
    let results = guess_bulk(&[PatternInput::default()]);
    assert!(results.is_empty());

    let mut out = Vec::new();
    write_rows(&results, &mut out, TableFormat::Csv).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Domain,First Name,Last Name,Guessed Email\n"
    );
}

#[tokio::test]
async fn test_profile_flow_emits_six_verified_rows() {
    let url = "https://www.linkedin.com/in/john-doe/";
    let enricher = enricher(
        StubResolver::default().with("Acme Corp", "Acme", "acme.com"),
        StubVerifier::default(),
        StubScraper::default().with(url, "Acme Corp"),
    );

    let guess = guess_single_profile(&enricher, url).await.unwrap();
    assert_eq!(guess.domain, "acme.com");
    assert_eq!(guess.company, "Acme Corp");

    let rows = guess.into_rows(url);
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.linkedin_url == url));
    assert_eq!(rows[2].email, "john.doe@acme.com");
    assert_eq!(rows[2].validation, VerificationStatus::Valid);
    assert_eq!(rows[0].validation, VerificationStatus::Unknown);
}

#[tokio::test]
async fn test_profile_bulk_drops_unresolvable_profiles() {
    let good = "https://www.linkedin.com/in/jane-roe";
    let enricher = enricher(
        StubResolver::default().with("Globex", "Globex", "globex.com"),
        StubVerifier::default(),
        StubScraper::default()
            .with(good, "Globex")
            .with("https://www.linkedin.com/in/madonna", "Globex")
            .with("https://www.linkedin.com/in/sam-poe", "Unknown Co"),
    );

    let rows: Vec<ProfileInput> = [
        good,
        "https://www.linkedin.com/in/madonna",
        "https://www.linkedin.com/in/sam-poe",
        "https://www.linkedin.com/in/broken-link",
        "",
    ]
    .iter()
    .map(|u| ProfileInput {
        linkedin_url: u.to_string(),
    })
    .collect();

    let results = guess_from_profiles(&enricher, &rows, |_| {}).await;
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r.linkedin_url == good));
    assert_eq!(results[4].email, "jroe@globex.com");
}

#[tokio::test]
async fn test_profile_single_failure_is_reported() {
    let enricher = enricher(
        StubResolver::default(),
        StubVerifier::default(),
        StubScraper::default(),
    );
    assert!(matches!(
        guess_single_profile(&enricher, "https://www.linkedin.com/in/john-doe").await,
        Err(AppError::NotFound(_))
    ));
}
