//! Operational guides under `operations/`.
//!
//! These documents are mostly fixed prose; only the project name and version
//! vary between runs.

use super::{Doc, RenderContext};

/// File name and title of every guide, in index order.
pub const GUIDES: [(&str, &str); 4] = [
    ("deployment-guide.md", "Deployment guide"),
    ("troubleshooting.md", "Troubleshooting guide"),
    ("checklist.md", "Operational checklist"),
    ("monitoring.md", "Monitoring and alerting"),
];

fn header(doc: &mut Doc, title: &str, ctx: &RenderContext) {
    doc.para(format!("# {title}"));
    doc.line(format!("**Project:** {}", ctx.project_name));
    doc.line(format!("**Version:** {}", ctx.version));
    if let Some(stamp) = ctx.generated_stamp() {
        doc.line(format!("**Generated:** {stamp}"));
    }
    doc.blank();
}

fn checklist(doc: &mut Doc, heading: &str, items: &[&str]) {
    doc.para(heading);
    for item in items {
        doc.line(format!("- [ ] {item}"));
    }
    doc.blank();
}

fn numbered(doc: &mut Doc, heading: &str, items: &[&str]) {
    doc.para(heading);
    for (i, item) in items.iter().enumerate() {
        doc.line(format!("{}. {item}", i + 1));
    }
    doc.blank();
}

fn bullets(doc: &mut Doc, heading: &str, items: &[&str]) {
    doc.para(heading);
    for item in items {
        doc.line(format!("- {item}"));
    }
    doc.blank();
}

/// `operations/deployment-guide.md`
pub fn deployment_guide(ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    header(&mut doc, "Deployment Guide", ctx);

    doc.para("## Overview");
    doc.para(format!(
        "Staged deployment procedure for {} {}.",
        ctx.project_name, ctx.version
    ));

    doc.para("## Prerequisites");
    bullets(
        &mut doc,
        "### Tools",
        &["AWS CLI v2.x", "Node.js 20.x", "AWS CDK v2.x", "Docker"],
    );
    bullets(
        &mut doc,
        "### Permissions",
        &[
            "CloudFormation",
            "Lambda",
            "DynamoDB",
            "OpenSearch",
            "FSx",
            "Cognito",
            "CloudFront",
            "WAF",
        ],
    );

    doc.para("## Environment");
    doc.fence(
        "bash",
        &format!(
            "aws configure\n\nexport PROJECT_NAME=\"{}\"\nexport PROJECT_VERSION={}\nexport ENVIRONMENT=production",
            ctx.project_name, ctx.version
        ),
    );

    doc.para("## Staged Deployment");
    doc.para("### Phase 1: Infrastructure");
    doc.fence(
        "bash",
        "npm install\nnpx cdk bootstrap\nnpx cdk deploy NetworkingStack\nnpx cdk deploy SecurityStack\nnpx cdk deploy DataStack",
    );
    doc.para("### Phase 2: Application");
    doc.fence(
        "bash",
        "npx cdk deploy ComputeStack\nnpx cdk deploy WebAppStack\nnpx cdk deploy OperationsStack",
    );
    doc.para("### Phase 3: Verification");
    doc.fence(
        "bash",
        "npm run test:integrated\ncurl https://your-domain.com/api/health\nnpm run test:functional",
    );

    doc.para("## Rollback");
    numbered(
        &mut doc,
        "### Emergency rollback",
        &[
            "Stop traffic at the CDN or load balancer",
            "Redeploy the previous stack version",
            "Run the health check",
            "Notify stakeholders",
        ],
    );

    doc.finish()
}

/// `operations/troubleshooting.md`
pub fn troubleshooting(ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    header(&mut doc, "Troubleshooting Guide", ctx);

    doc.para("## Common Problems");

    doc.para("### Deployment fails");
    doc.para("**Symptom:** `cdk deploy` exits with an error.");
    doc.para("**Likely causes:** missing permissions, service limits, configuration mistakes.");
    doc.fence(
        "bash",
        "aws sts get-caller-identity\nnpx cdk bootstrap --show-template\nnpx cdk diff",
    );

    doc.para("### Lambda function errors");
    doc.para("**Symptom:** a function does not behave as expected.");
    doc.para("**Likely causes:** dependencies, environment variables, timeouts.");
    doc.fence(
        "bash",
        "aws logs tail /aws/lambda/function-name --follow\naws lambda get-function-configuration --function-name function-name",
    );

    doc.para("### Login failures");
    doc.para("**Symptom:** users cannot sign in.");
    doc.para("**Likely causes:** Cognito configuration, mismatched credentials.");
    doc.fence(
        "bash",
        "aws cognito-idp list-users --user-pool-id your-pool-id\naws cognito-idp admin-get-user --user-pool-id your-pool-id --username testuser",
    );

    doc.para("### Slow responses");
    doc.para("**Symptom:** API latency is high.");
    doc.para("**Likely causes:** Lambda cold starts, DynamoDB throttling, OpenSearch load.");
    doc.fence(
        "bash",
        "aws cloudwatch get-metric-statistics --namespace AWS/Lambda --metric-name Duration\naws cloudwatch get-metric-statistics --namespace AWS/DynamoDB --metric-name ConsumedReadCapacityUnits",
    );

    doc.para("## Escalation");
    numbered(
        &mut doc,
        "### Level 1: automatic recovery",
        &["Run health checks", "Restart automatically", "Collect logs"],
    );
    numbered(
        &mut doc,
        "### Level 2: manual response",
        &[
            "Notify the engineering team",
            "Start a detailed investigation",
            "Apply a temporary workaround",
        ],
    );
    numbered(
        &mut doc,
        "### Level 3: emergency",
        &[
            "Page the on-call engineer",
            "Run an emergency rollback",
            "Notify customers",
        ],
    );

    doc.finish()
}

/// `operations/checklist.md`
pub fn checklist_guide(ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    header(&mut doc, "Operational Checklist", ctx);

    doc.para("## Daily");
    checklist(
        &mut doc,
        "### Monitoring",
        &[
            "Review CloudWatch alarm state",
            "Check Lambda error rates",
            "Check DynamoDB usage",
            "Check OpenSearch cluster health",
            "Check CloudFront distribution status",
        ],
    );
    checklist(
        &mut doc,
        "### Security",
        &[
            "Review WAF blocks",
            "Look for unauthorized access attempts",
            "Check TLS certificate expiry",
            "Review IAM policy changes",
        ],
    );

    doc.para("## Weekly");
    checklist(
        &mut doc,
        "### Backups",
        &[
            "Confirm data backups completed",
            "Run a restore test",
            "Check log rotation",
        ],
    );
    checklist(
        &mut doc,
        "### Capacity",
        &["Storage usage", "Database capacity", "Log volume"],
    );

    doc.para("## Monthly");
    checklist(
        &mut doc,
        "### Cost",
        &[
            "Review the AWS bill",
            "Look for optimization opportunities",
            "Check budget alerts",
        ],
    );
    checklist(
        &mut doc,
        "### Disaster recovery",
        &[
            "Review the recovery runbook",
            "Run a recovery drill",
            "Update procedures",
        ],
    );

    doc.para("## Incident Response");
    numbered(
        &mut doc,
        "### When an incident starts",
        &[
            "Open an incident record",
            "Identify the blast radius",
            "Notify stakeholders",
            "Apply mitigation",
            "Investigate the root cause",
            "Ship the permanent fix",
            "Hold a post-incident review",
        ],
    );

    doc.finish()
}

/// `operations/monitoring.md`
pub fn monitoring(ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    header(&mut doc, "Monitoring and Alerting Guide", ctx);

    doc.para("## Metrics");
    bullets(
        &mut doc,
        "### Lambda",
        &["Duration", "Errors", "Throttles", "Invocations"],
    );
    bullets(
        &mut doc,
        "### DynamoDB",
        &[
            "ConsumedReadCapacityUnits",
            "ConsumedWriteCapacityUnits",
            "ThrottledRequests",
        ],
    );
    bullets(
        &mut doc,
        "### OpenSearch",
        &["ClusterStatus", "SearchLatency", "IndexingLatency"],
    );
    bullets(
        &mut doc,
        "### CloudFront",
        &["Requests", "BytesDownloaded", "4xxErrorRate", "5xxErrorRate"],
    );

    doc.para("## Alerts");
    bullets(
        &mut doc,
        "### Critical",
        &[
            "Lambda error rate > 5%",
            "Any DynamoDB throttling",
            "OpenSearch cluster down",
            "CloudFront 5xx rate > 1%",
        ],
    );
    bullets(
        &mut doc,
        "### Warning",
        &[
            "Lambda duration > 10s",
            "DynamoDB capacity usage > 80%",
            "OpenSearch search latency > 1s",
            "CloudFront 4xx rate > 5%",
        ],
    );
    bullets(
        &mut doc,
        "### Info",
        &[
            "New user sign-ups",
            "Bulk document uploads",
            "Unusual traffic growth",
        ],
    );

    doc.para("## Notification Rules");
    bullets(
        &mut doc,
        "### Channels",
        &[
            "**Email:** important alerts",
            "**Chat:** routine notifications",
            "**SMS:** emergencies only",
        ],
    );

    doc.finish()
}

/// `operations/README.md`
pub fn index(ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    doc.para(format!("# {} Operations", ctx.project_name));
    for (file, title) in GUIDES {
        doc.line(format!("- [{title}]({file})"));
    }
    doc.blank();
    doc.finish()
}
