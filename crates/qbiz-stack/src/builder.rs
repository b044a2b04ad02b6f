//! Stack assembly
//!
//! Declares the thirteen resources in dependency order, wiring each
//! reference through a [`Declared`] handle, then hands the graph to the
//! validator. Nothing here talks to a provider.

use crate::config::{ResolvedProps, StackProps, StackSettings};
use crate::confluence::ConfluenceConfiguration;
use crate::error::StackError;
use crate::ids;
use crate::policies::{self, DataSourceTargets};
use crate::resources::{
    Application, DataSource, EncryptionKey, Index, ManagedPolicy, Retriever, Role, Secret,
    StackResource, WebExperience,
};
use qbiz_graph::{Attribute, Declared, Environment, GraphBuilder, ValidatedGraph};
use qbiz_iam::{validate_trust, PolicyDocument};

/// Display name of the index
pub const INDEX_DISPLAY_NAME: &str = "Index";

/// Display name of the retriever
pub const RETRIEVER_DISPLAY_NAME: &str = "Retriever";

/// Display name of the data source
pub const DATA_SOURCE_DISPLAY_NAME: &str = "ConfluenceDataSource";

/// Builder for the Q Business + Confluence stack graph
#[derive(Debug, Clone)]
#[must_use]
pub struct QBusinessStackBuilder {
    props: StackProps,
    environment: Environment,
}

impl QBusinessStackBuilder {
    /// Builder over `props`, resolving account and region at deploy time
    pub fn new(props: StackProps) -> Self {
        Self {
            props,
            environment: Environment::deploy_time(),
        }
    }

    /// Use explicit account and region
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replace the tunable settings
    pub fn with_settings(mut self, settings: StackSettings) -> Self {
        self.props.settings = settings;
        self
    }

    /// Assemble and validate the graph
    ///
    /// # Errors
    /// - `StackError::Config` for missing or out-of-range inputs; no
    ///   declaration is created
    /// - `StackError::Mapping`, `StackError::Policy`, `StackError::Graph`
    ///   for assembly defects
    pub fn build(&self) -> Result<ValidatedGraph<StackResource>, StackError> {
        let span = tracing::info_span!("build_stack");
        let _enter = span.enter();

        let props = self.props.resolve()?;
        let graph = Assembly::new(&props, &self.environment).run()?;

        tracing::info!(
            declarations = graph.len(),
            edges = graph.edge_count(),
            fingerprint = %graph.fingerprint(),
            "stack graph built"
        );
        Ok(graph)
    }
}

/// Build the stack graph for `props` in `environment`
///
/// # Errors
/// See [`QBusinessStackBuilder::build`].
pub fn build_stack(
    props: &StackProps,
    environment: &Environment,
) -> Result<ValidatedGraph<StackResource>, StackError> {
    QBusinessStackBuilder::new(props.clone())
        .with_environment(environment.clone())
        .build()
}

/// One assembly run
struct Assembly<'a> {
    props: &'a ResolvedProps,
    env: &'a Environment,
    graph: GraphBuilder<StackResource>,
    trust_documents: Vec<(&'static str, PolicyDocument)>,
}

impl<'a> Assembly<'a> {
    fn new(props: &'a ResolvedProps, env: &'a Environment) -> Self {
        Self {
            props,
            env,
            graph: GraphBuilder::with_capacity(ids::DECLARATION_ORDER.len()),
            trust_documents: Vec::with_capacity(3),
        }
    }

    fn declare(&mut self, id: &str, resource: impl Into<StackResource>) -> Result<Declared, StackError> {
        Ok(self.graph.declare(id, resource.into())?)
    }

    fn role(
        &mut self,
        id: &'static str,
        trust: PolicyDocument,
        policy: &Declared,
    ) -> Result<Declared, StackError> {
        self.trust_documents.push((id, trust.clone()));
        self.declare(id, Role::new(trust, vec![policy.attr(Attribute::Ref)]))
    }

    fn run(mut self) -> Result<ValidatedGraph<StackResource>, StackError> {
        let props = self.props;
        let settings = &props.settings;

        let key = self.declare(
            ids::KEY,
            EncryptionKey::new(
                settings.key_alias.clone(),
                policies::key_policy(self.env)?,
                settings.key_pending_window_days,
                settings.key_removal_policy,
            ),
        )?;

        let secret = self.declare(ids::SECRET, Secret::with_placeholders(key.attr(Attribute::Arn)))?;
        tracing::warn!(
            secret = ids::SECRET,
            "connector secret holds placeholder values; replace them after deployment"
        );

        let app_policy = self.declare(
            ids::APPLICATION_POLICY,
            ManagedPolicy::new(policies::application_policy(self.env)?),
        )?;
        let app_role = self.role(
            ids::APPLICATION_ROLE,
            policies::application_trust(self.env)?,
            &app_policy,
        )?;

        let application = self.declare(
            ids::APPLICATION,
            Application::new(
                settings.application_display_name.clone(),
                props.identity_center_instance_arn.as_str(),
                app_role.attr(Attribute::Arn),
            ),
        )?;
        let application_id = application.attr(Attribute::ApplicationId);
        let application_arn = application.attr(Attribute::ApplicationArn);

        let index = self.declare(
            ids::INDEX,
            Index::new(
                application_id.clone(),
                INDEX_DISPLAY_NAME,
                settings.index_type,
                settings.index_capacity_units,
            ),
        )?;

        self.declare(
            ids::RETRIEVER,
            Retriever::native_index(
                application_id.clone(),
                RETRIEVER_DISPLAY_NAME,
                index.attr(Attribute::IndexId),
            ),
        )?;

        let web_policy = self.declare(
            ids::WEB_EXPERIENCE_POLICY,
            ManagedPolicy::new(policies::web_experience_policy(&application_arn)?),
        )?;
        let web_role = self.role(
            ids::WEB_EXPERIENCE_ROLE,
            policies::web_experience_trust(self.env, &application_arn)?,
            &web_policy,
        )?;
        self.declare(
            ids::WEB_EXPERIENCE,
            WebExperience::new(application_id.clone(), web_role.attr(Attribute::Arn)),
        )?;

        let secret_arn = secret.attr(Attribute::Ref);
        let data_source_policy = self.declare(
            ids::DATA_SOURCE_POLICY,
            ManagedPolicy::new(policies::data_source_policy(
                self.env,
                DataSourceTargets {
                    secret_arn: &secret_arn,
                    key_arn: &key.attr(Attribute::Arn),
                    application_arn: &application_arn,
                    index_arn: &index.attr(Attribute::IndexArn),
                },
            )?),
        )?;
        let data_source_role = self.role(
            ids::DATA_SOURCE_ROLE,
            policies::data_source_trust(self.env, &application_arn)?,
            &data_source_policy,
        )?;

        let configuration = ConfluenceConfiguration::new(
            props.confluence_host_url.clone(),
            secret_arn,
            settings.sync_mode,
        )?
        .with_crawl_settings(settings.crawl.clone());
        self.declare(
            ids::DATA_SOURCE,
            DataSource::confluence(
                application_id,
                DATA_SOURCE_DISPLAY_NAME,
                index.attr(Attribute::IndexId),
                data_source_role.attr(Attribute::Arn),
                configuration,
            ),
        )?;

        for (role, trust) in &self.trust_documents {
            validate_trust(trust).map_err(|error| {
                tracing::error!(role = %role, %error, "trust document is not fully scoped");
                error
            })?;
        }

        Ok(self.graph.validate()?)
    }
}
