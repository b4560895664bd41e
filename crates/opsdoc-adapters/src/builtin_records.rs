//! Built-in baseline records.
//!
//! Every collection ends with these, so a project without any scannable
//! sources still produces a complete documentation tree.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value, json};

use opsdoc_core::domain::{
    ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse, ArchitectureComponent, ComponentType,
    HttpMethod, ParameterLocation, RecordSet, TestReport, TestSuiteReport, TestSummary,
};

/// The full baseline set.
pub fn baseline() -> RecordSet {
    RecordSet::new(endpoints(), components(), reports())
}

/// Login, chat, list documents and upload document.
pub fn endpoints() -> Vec<ApiEndpoint> {
    vec![
        ApiEndpoint::new("/api/auth/login", HttpMethod::Post)
            .with_summary("User login")
            .with_description("Authenticates a user and issues an access token")
            .with_request_body(
                ApiRequestBody::new(
                    "Login credentials",
                    "application/json",
                    json!({
                        "type": "object",
                        "properties": {
                            "username": {"type": "string", "description": "User name"},
                            "password": {"type": "string", "description": "Password"}
                        },
                        "required": ["username", "password"]
                    }),
                )
                .with_example(json!({"username": "testuser", "password": "password123"})),
            )
            .with_response(
                ApiResponse::json(200, "Login succeeded")
                    .with_schema(json!({
                        "type": "object",
                        "properties": {
                            "token": {"type": "string", "description": "Access token"},
                            "expiresIn": {"type": "number", "description": "Lifetime in seconds"}
                        }
                    }))
                    .with_example(json!({
                        "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                        "expiresIn": 3600
                    })),
            )
            .with_response(
                ApiResponse::json(401, "Login failed")
                    .with_schema(json!({
                        "type": "object",
                        "properties": {
                            "error": {"type": "string", "description": "Error message"}
                        }
                    }))
                    .with_example(json!({"error": "Invalid credentials"})),
            )
            .with_tag("Authentication"),
        ApiEndpoint::new("/api/chat", HttpMethod::Post)
            .with_summary("Send chat message")
            .with_description("Sends a user message and returns the AI response")
            .with_request_body(
                ApiRequestBody::new(
                    "Chat message",
                    "application/json",
                    json!({
                        "type": "object",
                        "properties": {
                            "message": {"type": "string", "description": "User message"},
                            "sessionId": {"type": "string", "description": "Session id"}
                        },
                        "required": ["message"]
                    }),
                )
                .with_example(json!({
                    "message": "Tell me about FSx for NetApp ONTAP",
                    "sessionId": "session-123"
                })),
            )
            .with_response(
                ApiResponse::json(200, "Chat response")
                    .with_schema(json!({
                        "type": "object",
                        "properties": {
                            "response": {"type": "string", "description": "AI response"},
                            "sources": {"type": "array", "description": "Referenced sources"},
                            "sessionId": {"type": "string", "description": "Session id"}
                        }
                    }))
                    .with_example(json!({
                        "response": "FSx for NetApp ONTAP is a managed file system built on ONTAP...",
                        "sources": ["document1.pdf", "document2.pdf"],
                        "sessionId": "session-123"
                    })),
            )
            .with_tag("Chat")
            .with_security("BearerAuth"),
        ApiEndpoint::new("/api/documents", HttpMethod::Get)
            .with_summary("List documents")
            .with_description("Returns the uploaded documents, one page at a time")
            .with_parameter(
                ApiParameter::new("page", ParameterLocation::Query, "integer")
                    .with_description("Page number")
                    .with_example(json!(1)),
            )
            .with_parameter(
                ApiParameter::new("limit", ParameterLocation::Query, "integer")
                    .with_description("Items per page")
                    .with_example(json!(20)),
            )
            .with_response(ApiResponse::json(200, "Document list").with_schema(json!({
                "type": "object",
                "properties": {
                    "documents": {"type": "array", "description": "Documents"},
                    "total": {"type": "number", "description": "Total count"},
                    "page": {"type": "number", "description": "Current page"}
                }
            })))
            .with_tag("Documents")
            .with_security("BearerAuth"),
        ApiEndpoint::new("/api/documents", HttpMethod::Post)
            .with_summary("Upload document")
            .with_description("Uploads a new document")
            .with_request_body(ApiRequestBody::new(
                "File to upload",
                "multipart/form-data",
                json!({
                    "type": "object",
                    "properties": {
                        "file": {"type": "string", "format": "binary", "description": "File"},
                        "title": {"type": "string", "description": "Document title"},
                        "description": {"type": "string", "description": "Document description"}
                    },
                    "required": ["file"]
                }),
            ))
            .with_response(ApiResponse::json(201, "Upload accepted").with_schema(json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "Document id"},
                    "filename": {"type": "string", "description": "File name"},
                    "status": {"type": "string", "description": "Processing status"}
                }
            })))
            .with_tag("Documents")
            .with_security("BearerAuth"),
    ]
}

/// The reference deployment: edge, compute, data and observability.
pub fn components() -> Vec<ArchitectureComponent> {
    use ComponentType::*;

    vec![
        ArchitectureComponent::new("cloudfront", "CloudFront", Network)
            .with_description("Global CDN serving static content")
            .with_technology("Amazon CloudFront")
            .connects_to("waf")
            .connects_to("alb")
            .with_property("caching", true)
            .with_property("ssl", true)
            .with_property("gzip", true),
        ArchitectureComponent::new("waf", "WAF", Security)
            .with_description("Web application firewall")
            .with_technology("AWS WAF")
            .connects_to("alb")
            .with_property("sqlInjectionProtection", true)
            .with_property("xssProtection", true)
            .with_property("rateLimiting", true),
        ArchitectureComponent::new("alb", "Application Load Balancer", Network)
            .with_description("Application load balancer")
            .with_technology("AWS ALB")
            .connects_to("lambda-web")
            .connects_to("lambda-api")
            .with_property("healthCheck", true)
            .with_property("sslTermination", true),
        ArchitectureComponent::new("lambda-web", "Web Lambda", Service)
            .with_description("Next.js frontend application")
            .with_technology("AWS Lambda + Next.js")
            .connects_to("lambda-api")
            .with_property("runtime", "nodejs20.x")
            .with_property("memory", "1024MB")
            .with_property("timeout", "30s"),
        ArchitectureComponent::new("lambda-api", "API Lambda", Service)
            .with_description("RESTful API server")
            .with_technology("AWS Lambda + Express.js")
            .connects_to("dynamodb")
            .connects_to("opensearch")
            .connects_to("bedrock")
            .connects_to("fsx")
            .with_property("runtime", "nodejs20.x")
            .with_property("memory", "2048MB")
            .with_property("timeout", "5m"),
        ArchitectureComponent::new("lambda-embed", "Embedding Lambda", Service)
            .with_description("Document embedding pipeline")
            .with_technology("AWS Lambda + Python")
            .connects_to("bedrock")
            .connects_to("opensearch")
            .connects_to("fsx")
            .with_property("runtime", "python3.11")
            .with_property("memory", "3008MB")
            .with_property("timeout", "15m"),
        ArchitectureComponent::new("dynamodb", "DynamoDB", Database)
            .with_description("Session management and user data")
            .with_technology("Amazon DynamoDB")
            .with_property("billingMode", "PAY_PER_REQUEST")
            .with_property("encryption", true)
            .with_property("pointInTimeRecovery", true),
        ArchitectureComponent::new("opensearch", "OpenSearch Serverless", Database)
            .with_description("Vector search engine")
            .with_technology("Amazon OpenSearch Serverless")
            .with_property("vectorSearch", true)
            .with_property("serverless", true)
            .with_property("encryption", true),
        ArchitectureComponent::new("fsx", "FSx for NetApp ONTAP", Storage)
            .with_description("High-performance file storage")
            .with_technology("Amazon FSx for NetApp ONTAP")
            .with_property("protocol", "NFS/SMB")
            .with_property("deduplication", true)
            .with_property("compression", true)
            .with_property("snapshots", true),
        ArchitectureComponent::new("bedrock", "Amazon Bedrock", Service)
            .with_description("AI/ML inference")
            .with_technology("Amazon Bedrock")
            .with_property("models", json!(["Claude", "Titan"]))
            .with_property("embedding", true)
            .with_property("textGeneration", true),
        ArchitectureComponent::new("cognito", "Cognito", Security)
            .with_description("User authentication and authorization")
            .with_technology("Amazon Cognito")
            .connects_to("lambda-api")
            .with_property("userPool", true)
            .with_property("mfa", true)
            .with_property("oauth", true),
        ArchitectureComponent::new("cloudwatch", "CloudWatch", Monitoring)
            .with_description("Log and metric monitoring")
            .with_technology("Amazon CloudWatch")
            .connects_to("lambda-web")
            .connects_to("lambda-api")
            .connects_to("lambda-embed")
            .with_property("logs", true)
            .with_property("metrics", true)
            .with_property("alarms", true),
    ]
}

/// Two integrated runs, production (newest) then staging.
pub fn reports() -> Vec<TestReport> {
    vec![
        TestReport {
            test_run_id: "integrated-test-1703123456789".into(),
            timestamp: at(2024, 12, 21),
            environment: "production".into(),
            summary: TestSummary {
                total_tests: 148,
                passed_tests: 142,
                failed_tests: 6,
                skipped_tests: 0,
                overall_score: 88.5,
            },
            suite_results: vec![
                suite("security", true, 92.3, 1_245_000, 45, &[
                    ("encryptionTests", 15),
                    ("authenticationTests", 20),
                    ("vulnerabilityTests", 10),
                ]),
                suite("performance", true, 85.7, 2_100_000, 23, &[
                    ("loadTests", 10),
                    ("scalabilityTests", 8),
                    ("uptimeTests", 5),
                ]),
                suite("functional", false, 87.5, 1_800_000, 80, &[
                    ("uiTests", 25),
                    ("apiTests", 40),
                    ("integrationTests", 15),
                ]),
            ],
            recommendations: vec![
                "Fix the file upload feature".into(),
                "Optimize database queries".into(),
                "Review the security header configuration".into(),
            ],
        },
        TestReport {
            test_run_id: "integrated-test-1703037056789".into(),
            timestamp: at(2024, 12, 20),
            environment: "staging".into(),
            summary: TestSummary {
                total_tests: 156,
                passed_tests: 148,
                failed_tests: 8,
                skipped_tests: 0,
                overall_score: 91.2,
            },
            suite_results: vec![
                suite("security", true, 94.1, 1_180_000, 48, &[
                    ("encryptionTests", 16),
                    ("authenticationTests", 22),
                    ("vulnerabilityTests", 10),
                ]),
                suite("performance", true, 89.3, 2_400_000, 28, &[
                    ("loadTests", 12),
                    ("scalabilityTests", 10),
                    ("uptimeTests", 6),
                ]),
                suite("functional", true, 90.0, 1_650_000, 80, &[
                    ("uiTests", 25),
                    ("apiTests", 40),
                    ("integrationTests", 15),
                ]),
            ],
            recommendations: vec![
                "Continue performance optimization".into(),
                "Strengthen security monitoring".into(),
                "Increase test coverage".into(),
            ],
        },
    ]
}

// 10:30 UTC on the given day
fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 30, 0)
        .single()
        .unwrap_or_default()
}

fn suite(
    name: &str,
    success: bool,
    score: f64,
    duration: u64,
    test_count: u32,
    details: &[(&str, u64)],
) -> TestSuiteReport {
    TestSuiteReport {
        suite_name: name.into(),
        success,
        score,
        duration,
        test_count,
        details: details
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect::<Map<String, Value>>(),
    }
}
