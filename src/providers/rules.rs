//! Rules provider - calls to the RESC rules and findings endpoints

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::RulesApi;
use crate::error::TransportError;
use crate::models::{end_of_day, start_of_day, DetectedRulesFilter, RuleFile};
use crate::query::QueryParams;
use crate::transport::{
    ApiResponse, RequestOptions, ResponseEncoding, Transport, TransportConfig,
};

pub const DETECTED_RULES_PATH: &str = "/detected-rules";
pub const FINDING_STATUS_COUNT_PATH: &str = "/rules/finding-status-count";
pub const RULE_PACKS_PATH: &str = "/rules/rule-packs";
pub const UPLOAD_RULE_PACK_PATH: &str = "/rules/upload-rule-pack";
pub const DOWNLOAD_RULE_PACK_PATH: &str = "/rules/download-rule-pack";

/// Multipart field carrying the uploaded rule pack
pub const RULE_FILE_FIELD: &str = "rule_file";

/// Stateless client for the rules API
#[derive(Debug, Clone)]
pub struct RuleService {
    transport: Transport,
    options: RequestOptions,
}

impl RuleService {
    /// Create a service with its own transport
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(Transport::new(config)?))
    }

    /// Create a service on top of an existing transport
    pub fn with_transport(transport: Transport) -> Self {
        Self {
            transport,
            options: RequestOptions::default(),
        }
    }

    /// A copy of this service whose calls use `options`
    ///
    /// The underlying connection pool is shared.
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self {
            transport: self.transport.clone(),
            options,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Query for `/detected-rules`
    pub fn detected_rules_query(filter: &DetectedRulesFilter) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .extend("findingstatus", &filter.finding_statuses)
            .extend("vcsprovider", &filter.vcs_providers)
            .push_opt("projectname", filter.project.as_deref())
            .push_opt("repositoryname", filter.repository.as_deref())
            .push_opt("start_date_time", filter.start_date.map(start_of_day))
            .push_opt("end_date_time", filter.end_date.map(end_of_day))
            .extend("rule_pack_version", &filter.rule_pack_versions);
        params
    }

    /// Query for `/rules/finding-status-count`
    pub fn finding_status_count_query(
        rule_pack_versions: &[String],
        rule_tags: &[String],
    ) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .extend("rule_pack_version", rule_pack_versions)
            .extend("rule_tag", rule_tags);
        params
    }

    /// Query for `/rules/rule-packs`
    pub fn rule_packs_query(per_page: Option<u32>, skip_row_count: Option<u32>) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("skip", skip_row_count)
            .push_opt("limit", per_page);
        params
    }

    async fn get(
        &self,
        path: &str,
        params: &QueryParams,
        encoding: ResponseEncoding,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.transport.url_for(path, params)?;
        tracing::debug!(%url, "GET");
        self.transport
            .execute(Method::GET, url, encoding, self.options, |request| request)
            .await
    }
}

#[async_trait]
impl RulesApi for RuleService {
    async fn get_all_detected_rules(
        &self,
        filter: &DetectedRulesFilter,
    ) -> Result<ApiResponse, TransportError> {
        let params = Self::detected_rules_query(filter);
        self.get(DETECTED_RULES_PATH, &params, ResponseEncoding::Json)
            .await
    }

    async fn get_rules_with_finding_status_count(
        &self,
        rule_pack_versions: &[String],
        rule_tags: &[String],
    ) -> Result<ApiResponse, TransportError> {
        let params = Self::finding_status_count_query(rule_pack_versions, rule_tags);
        self.get(FINDING_STATUS_COUNT_PATH, &params, ResponseEncoding::Json)
            .await
    }

    async fn get_rule_packs(
        &self,
        per_page: Option<u32>,
        skip_row_count: Option<u32>,
    ) -> Result<ApiResponse, TransportError> {
        let params = Self::rule_packs_query(per_page, skip_row_count);
        self.get(RULE_PACKS_PATH, &params, ResponseEncoding::Json)
            .await
    }

    async fn upload_rule_pack(&self, rule_file: &RuleFile) -> Result<ApiResponse, TransportError> {
        let url = self
            .transport
            .url_for(UPLOAD_RULE_PACK_PATH, &QueryParams::new())?;
        tracing::info!(
            file = %rule_file.file_name,
            size = rule_file.len(),
            "uploading rule pack"
        );

        self.transport
            .execute(
                Method::POST,
                url,
                ResponseEncoding::Json,
                self.options,
                |request| {
                    let part = Part::bytes(rule_file.bytes.to_vec())
                        .file_name(rule_file.file_name.clone());
                    request.multipart(Form::new().part(RULE_FILE_FIELD, part))
                },
            )
            .await
    }

    async fn download_rule_pack(
        &self,
        rule_pack_version: &str,
    ) -> Result<ApiResponse, TransportError> {
        let mut params = QueryParams::new();
        params.push("rule_pack_version", rule_pack_version);
        self.get(DOWNLOAD_RULE_PACK_PATH, &params, ResponseEncoding::Binary)
            .await
    }
}
