use pretty_assertions::assert_eq;
use qbiz_graph::{Environment, LogicalId, Resource, Token};
use qbiz_stack::confluence::{ContentCategory, IndexFieldType, SyncMode, CONFLUENCE_DATE_FORMAT};
use qbiz_stack::ids;
use qbiz_stack::resources::{IndexType, RetrieverType, PLACEHOLDER_VALUE};
use qbiz_stack::{build_stack, ConfigError, QBusinessStackBuilder, StackError, StackProps};
use qbiz_test_utils::{
    build_deploy_time_graph, build_sample_graph, init_tracing, sample_environment, sample_props,
    CONFLUENCE_HOST_URL, IDENTITY_CENTER_ARN,
};
use serde_json::json;

fn id(value: &str) -> LogicalId {
    LogicalId::new(value).unwrap()
}

fn deps<'a>(
    graph: &'a qbiz_graph::ValidatedGraph<qbiz_stack::StackResource>,
    of: &str,
) -> Vec<&'a str> {
    let mut deps: Vec<&str> = graph
        .dependencies(&id(of))
        .unwrap()
        .iter()
        .map(LogicalId::as_str)
        .collect();
    deps.sort_unstable();
    deps
}

#[test]
fn declares_thirteen_resources_in_order() {
    init_tracing();
    let graph = build_sample_graph();

    assert_eq!(graph.len(), 13);
    let order: Vec<&str> = graph.ids().map(LogicalId::as_str).collect();
    assert_eq!(order, ids::DECLARATION_ORDER);

    let types: Vec<&str> = graph.declarations().map(|d| d.resource_type()).collect();
    assert_eq!(
        types,
        [
            "AWS::KMS::Key",
            "AWS::SecretsManager::Secret",
            "AWS::IAM::ManagedPolicy",
            "AWS::IAM::Role",
            "AWS::QBusiness::Application",
            "AWS::QBusiness::Index",
            "AWS::QBusiness::Retriever",
            "AWS::IAM::ManagedPolicy",
            "AWS::IAM::Role",
            "AWS::QBusiness::WebExperience",
            "AWS::IAM::ManagedPolicy",
            "AWS::IAM::Role",
            "AWS::QBusiness::DataSource",
        ]
    );
}

#[test]
fn dependency_sets_match_wiring() {
    let graph = build_deploy_time_graph();

    assert!(deps(&graph, ids::KEY).is_empty());
    assert_eq!(deps(&graph, ids::SECRET), [ids::KEY]);
    assert!(deps(&graph, ids::APPLICATION_POLICY).is_empty());
    assert_eq!(deps(&graph, ids::APPLICATION_ROLE), [ids::APPLICATION_POLICY]);
    assert_eq!(deps(&graph, ids::APPLICATION), [ids::APPLICATION_ROLE]);
    assert_eq!(deps(&graph, ids::INDEX), [ids::APPLICATION]);
    assert_eq!(deps(&graph, ids::RETRIEVER), [ids::APPLICATION, ids::INDEX]);
    assert_eq!(deps(&graph, ids::WEB_EXPERIENCE_POLICY), [ids::APPLICATION]);
    assert_eq!(
        deps(&graph, ids::WEB_EXPERIENCE_ROLE),
        [ids::APPLICATION, ids::WEB_EXPERIENCE_POLICY]
    );
    assert_eq!(
        deps(&graph, ids::WEB_EXPERIENCE),
        [ids::APPLICATION, ids::WEB_EXPERIENCE_ROLE]
    );
    assert_eq!(
        deps(&graph, ids::DATA_SOURCE_POLICY),
        [ids::APPLICATION, ids::INDEX, ids::KEY, ids::SECRET]
    );
    assert_eq!(
        deps(&graph, ids::DATA_SOURCE_ROLE),
        [ids::APPLICATION, ids::DATA_SOURCE_POLICY]
    );
    assert_eq!(
        deps(&graph, ids::DATA_SOURCE),
        [ids::APPLICATION, ids::DATA_SOURCE_ROLE, ids::INDEX, ids::SECRET]
    );
}

#[test]
fn every_dependency_is_declared_earlier() {
    let graph = build_sample_graph();
    for (dependency, dependent) in graph.edges() {
        assert!(
            graph.position(dependency).unwrap() < graph.position(dependent).unwrap(),
            "{dependent} depends on later {dependency}"
        );
    }
    assert_eq!(graph.topological_order().len(), 13);
}

#[test]
fn realization_waves_follow_dependencies() {
    let graph = build_sample_graph();
    let waves = graph.realization_waves();
    let first: Vec<&str> = waves[0].iter().map(|id| id.as_str()).collect();
    assert_eq!(first, [ids::KEY, ids::APPLICATION_POLICY]);
    assert_eq!(waves.iter().map(Vec::len).sum::<usize>(), 13);

    let last: Vec<&str> = waves.last().unwrap().iter().map(|id| id.as_str()).collect();
    assert_eq!(last, [ids::DATA_SOURCE]);
}

#[test]
fn key_is_consumed_by_secret_and_data_source_policy() {
    let graph = build_sample_graph();
    let mut dependents: Vec<&str> = graph
        .dependents(&id(ids::KEY))
        .into_iter()
        .map(LogicalId::as_str)
        .collect();
    dependents.sort_unstable();
    assert_eq!(dependents, [ids::DATA_SOURCE_POLICY, ids::SECRET]);
}

#[test]
fn end_to_end_sample_inputs() {
    let graph = build_sample_graph();

    let application = graph.get_str(ids::APPLICATION).unwrap().resource();
    let application = application.as_application().unwrap();
    assert_eq!(application.display_name(), "CDK_QBusiness");
    assert_eq!(
        application.identity_center_instance_arn(),
        &Token::literal(IDENTITY_CENTER_ARN)
    );

    let data_source = graph.get_str(ids::DATA_SOURCE).unwrap().resource();
    let data_source = data_source.as_data_source().unwrap();
    let configuration = data_source.configuration();
    assert_eq!(data_source.display_name(), "ConfluenceDataSource");
    assert_eq!(configuration.sync_mode(), SyncMode::ForcedFullCrawl);
    assert!(configuration.identity_crawler_enabled());

    let value = serde_json::to_value(configuration).unwrap();
    assert_eq!(
        value["connectionConfiguration"]["repositoryEndpointMetadata"],
        json!({"type": "SAAS", "hostUrl": CONFLUENCE_HOST_URL, "authType": "Basic"})
    );
    assert_eq!(value["secretArn"], json!({"Ref": "Secret"}));

    let secret = graph.get_str(ids::SECRET).unwrap().resource();
    let secret = secret.as_secret().unwrap();
    assert!(secret.requires_manual_replacement());
    assert_eq!(secret.fields().password, PLACEHOLDER_VALUE);
}

#[test]
fn opaque_identity_reference_scenario() {
    let graph = build_stack(
        &StackProps::new("R1", "https://example.atlassian.net/"),
        &Environment::deploy_time(),
    )
    .unwrap();

    let data_source = graph.get_str(ids::DATA_SOURCE).unwrap().resource();
    let data_source = data_source.as_data_source().unwrap();
    let endpoint = data_source.configuration().endpoint();
    assert_eq!(
        serde_json::to_value(endpoint).unwrap(),
        json!({"type": "SAAS", "hostUrl": "https://example.atlassian.net/", "authType": "Basic"})
    );

    let owning_index: Vec<&str> = data_source
        .index_id()
        .references()
        .into_iter()
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(owning_index, [ids::INDEX]);
    assert_eq!(graph.position(&id(ids::INDEX)), Some(5));
}

#[test]
fn index_and_retriever_settings() {
    let graph = build_sample_graph();

    let index = graph.get_str(ids::INDEX).unwrap().resource().as_index().unwrap().clone();
    assert_eq!(index.display_name(), "Index");
    assert_eq!(index.index_type(), IndexType::Starter);
    assert_eq!(index.capacity_units(), 1);

    let retriever = graph.get_str(ids::RETRIEVER).unwrap().resource();
    let retriever = retriever.as_retriever().unwrap();
    assert_eq!(retriever.retriever_type(), RetrieverType::NativeIndex);
    assert_eq!(retriever.index_id().references()[0].0.as_str(), ids::INDEX);
}

#[test]
fn field_mapping_tables() {
    let graph = build_sample_graph();
    let data_source = graph.get_str(ids::DATA_SOURCE).unwrap().resource();
    let configuration = data_source.as_data_source().unwrap().configuration();

    let space = configuration.field_mappings(ContentCategory::Space);
    let page = configuration.field_mappings(ContentCategory::Page);
    assert_eq!(space.len(), 2);
    assert_eq!(page.len(), 5);
    assert!(space
        .mappings()
        .iter()
        .all(|m| m.field_type() != IndexFieldType::Date && m.date_format().is_none()));

    let dates: Vec<_> = page
        .mappings()
        .iter()
        .filter(|m| m.field_type() == IndexFieldType::Date)
        .collect();
    assert_eq!(dates.len(), 2);
    assert!(dates
        .iter()
        .all(|m| m.date_format() == Some(CONFLUENCE_DATE_FORMAT)));
}

#[test]
fn crawl_scope_is_pages_with_acls() {
    let graph = build_sample_graph();
    let data_source = graph.get_str(ids::DATA_SOURCE).unwrap().resource();
    let crawl = data_source.as_data_source().unwrap().configuration().crawl_settings();

    assert!(crawl.is_crawl_page);
    assert!(crawl.is_crawl_acl);
    assert!(!crawl.is_crawl_blog);
    assert!(!crawl.is_crawl_page_attachment);
    assert_eq!(crawl.field_for_user_id, "uuid");
    assert_eq!(crawl.max_file_size_in_megabytes, "50");
    assert!(crawl.inclusion_space_key_filter.is_empty());
}

#[test]
fn building_twice_is_identical() {
    let first = build_stack(&sample_props(), &sample_environment()).unwrap();
    let second = build_stack(&sample_props(), &sample_environment()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn inputs_change_the_fingerprint() {
    let base = build_sample_graph();
    let other = build_stack(
        &StackProps::new(IDENTITY_CENTER_ARN, "https://other.atlassian.net/"),
        &sample_environment(),
    )
    .unwrap();
    assert_ne!(base.fingerprint(), other.fingerprint());

    let deploy_time = build_deploy_time_graph();
    assert_ne!(base.fingerprint(), deploy_time.fingerprint());
}

#[test]
fn missing_identity_directory_is_rejected() {
    let props = StackProps {
        identity_center_instance_arn: None,
        ..sample_props()
    };
    let error = QBusinessStackBuilder::new(props)
        .with_environment(Environment::deploy_time())
        .build()
        .unwrap_err();

    assert!(error.is_recoverable());
    assert!(matches!(
        error,
        StackError::Config(ConfigError::MissingParameter("identity_center_instance_arn"))
    ));
}

#[test]
fn resources_report_their_tokens() {
    let graph = build_sample_graph();
    let declaration = graph.get_str(ids::WEB_EXPERIENCE).unwrap();
    let referenced: Vec<&str> = declaration
        .resource()
        .tokens()
        .into_iter()
        .flat_map(Token::references)
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(referenced, [ids::APPLICATION, ids::WEB_EXPERIENCE_ROLE]);
}
