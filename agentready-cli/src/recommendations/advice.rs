//! Static remediation text and effort estimates, keyed by criterion id

use crate::models::Effort;
use Effort::{High, Low, Medium};

pub struct Advice {
    pub id: &'static str,
    pub description: &'static str,
    pub reason: &'static str,
    pub effort: Effort,
}

const fn advice(
    id: &'static str,
    effort: Effort,
    description: &'static str,
    reason: &'static str,
) -> Advice {
    Advice {
        id,
        description,
        reason,
        effort,
    }
}

pub static ADVICE: &[Advice] = &[
    // style
    advice("style.linter_config", Low,
        "Add a linter configuration (ESLint, Ruff, Clippy, golangci-lint) at the repository root.",
        "Agents rely on lint output to catch mistakes they cannot see by reading code."),
    advice("style.formatter_config", Low,
        "Commit a formatter configuration such as rustfmt.toml, .prettierrc or [tool.black].",
        "A formatter removes style churn from agent diffs and keeps reviews focused."),
    advice("style.type_checking", Medium,
        "Enable a static type checker (mypy, pyright or TypeScript) for the codebase.",
        "Type errors give agents fast, precise feedback before anything runs."),
    advice("style.lint_in_ci", Low,
        "Run the linter as a required CI step.",
        "Lint rules that are not enforced drift, and agents copy whatever they find."),
    advice("style.pre_commit_hooks", Low,
        "Add pre-commit hooks (pre-commit, husky or lefthook) for formatting and linting.",
        "Hooks catch problems locally, before an agent opens a pull request."),
    advice("style.strict_typing", Medium,
        "Turn on strict mode for the type checker, or add a [lints] table for Rust.",
        "Strict settings close the loopholes that let incorrect agent code type-check."),
    // build
    advice("build.manifest", Low,
        "Declare dependencies in a standard manifest (Cargo.toml, package.json, pyproject.toml, go.mod).",
        "Without a manifest an agent has to guess how the project is assembled."),
    advice("build.lockfile", Low,
        "Commit the lockfile produced by your package manager.",
        "A lockfile makes the agent's environment match CI and every other contributor."),
    advice("build.task_runner", Low,
        "Add a Makefile, justfile or package scripts with build, test and lint targets.",
        "Named tasks give agents one obvious command for each job."),
    advice("build.ci_pipeline", Medium,
        "Set up a CI pipeline that runs on every pull request.",
        "CI is the only feedback an agent gets on changes it cannot fully run locally."),
    advice("build.ci_build_step", Low,
        "Make CI build the project, not just lint it.",
        "A build step proves that agent changes still compile in a clean environment."),
    advice("build.pinned_toolchain", Low,
        "Pin the toolchain version with rust-toolchain.toml, .nvmrc, .python-version or .tool-versions.",
        "Pinned toolchains stop version drift between the agent, CI and humans."),
    advice("build.release_automation", High,
        "Automate releases with a release workflow or a tool like release-please or goreleaser.",
        "Automated releases let agents ship changes end to end without manual steps."),
    // testing
    advice("testing.test_files", High,
        "Add an automated test suite next to the code it covers.",
        "Tests are how an agent checks that a change did what it meant to."),
    advice("testing.test_command", Low,
        "Expose a single test command (npm test, make test, pytest).",
        "Agents need one command that runs the whole suite with no setup guesswork."),
    advice("testing.tests_in_ci", Low,
        "Run the test suite in CI on every pull request.",
        "Tests that only run locally are skipped as soon as an agent is in a hurry."),
    advice("testing.coverage", Medium,
        "Collect and publish coverage (codecov, coveralls, llvm-cov, pytest-cov).",
        "Coverage shows agents which code paths have no safety net."),
    advice("testing.integration_tests", High,
        "Add integration or end-to-end tests that exercise the public surface.",
        "Unit tests alone miss the wiring mistakes agents commonly make."),
    advice("testing.test_guidance", Low,
        "Document in AGENTS.md how to run the full suite and a single test, and what must pass.",
        "Explicit test instructions stop agents from declaring work done too early."),
    // docs
    advice("docs.readme", Low,
        "Add a README that explains what the project is and how to use it.",
        "The README is the first file every agent reads for orientation."),
    advice("docs.agent_instructions", Low,
        "Add an AGENTS.md (or CLAUDE.md, copilot-instructions.md) with build, test and style rules.",
        "Agent instruction files are loaded automatically and steer every session."),
    advice("docs.contributing", Low,
        "Write a CONTRIBUTING.md covering workflow, branching and review expectations.",
        "Agents follow written process far more reliably than implied convention."),
    advice("docs.readme_setup", Low,
        "Add installation and development sections to the README.",
        "Setup steps let an agent get from clone to green tests without trial and error."),
    advice("docs.changelog", Low,
        "Keep a CHANGELOG.md updated with each release.",
        "A changelog gives agents recent history without digging through commits."),
    advice("docs.architecture", Medium,
        "Document the architecture in ARCHITECTURE.md or architecture decision records.",
        "Architecture notes keep agents from putting code in the wrong layer."),
    advice("docs.agent_instructions_quality", Medium,
        "Rewrite agent instructions with concrete commands, conventions and pitfalls.",
        "Vague instructions are ignored; concrete ones change agent behavior."),
    advice("docs.published_docs", High,
        "Publish generated documentation (mkdocs, docusaurus, mdBook, docs.rs).",
        "Published docs give agents a browsable reference for public interfaces."),
    // dev_env
    advice("dev_env.gitignore", Low,
        "Add a .gitignore for build output, dependencies and local files.",
        "Without one, agents commit build artifacts and local state."),
    advice("dev_env.env_example", Low,
        "Commit a .env.example listing every required environment variable.",
        "Agents cannot discover required configuration that only lives on someone's machine."),
    advice("dev_env.containerized", Medium,
        "Provide a Dockerfile or compose file that runs the project and its services.",
        "Containers give agents the same runtime dependencies as production."),
    advice("dev_env.setup_script", Low,
        "Add a setup or bootstrap script (or a make setup target).",
        "One-step setup removes the most common reason agent sessions stall."),
    advice("dev_env.devcontainer", Medium,
        "Add a devcontainer.json or Nix flake describing the full development environment.",
        "A reproducible environment lets agents run in sandboxes identical to yours."),
    // security
    advice("security.gitignore_secrets", Low,
        "Ignore .env files and private keys in .gitignore.",
        "Agents create local secret files and will commit them if git allows it."),
    advice("security.policy", Low,
        "Add a SECURITY.md describing how to report vulnerabilities.",
        "A policy tells agents and humans how security issues must be handled."),
    advice("security.dependency_updates", Low,
        "Enable Dependabot or Renovate for dependency updates.",
        "Automated update PRs are small, well-scoped tasks agents handle well."),
    advice("security.codeowners", Low,
        "Add a CODEOWNERS file mapping paths to reviewers.",
        "Code owners make sure agent changes reach someone who knows the area."),
    advice("security.dependency_audit", Low,
        "Run a dependency audit (cargo deny, npm audit, pip-audit, govulncheck) in CI.",
        "Audits catch vulnerable packages that an agent might add without noticing."),
    advice("security.secret_scanning", Medium,
        "Add secret scanning with gitleaks, trufflehog or detect-secrets.",
        "Scanning stops leaked credentials before they reach the remote."),
    advice("security.static_analysis", Medium,
        "Run static security analysis such as CodeQL or Semgrep in CI.",
        "SAST flags insecure patterns that pass tests and review."),
    // observability
    advice("observability.logging", Low,
        "Adopt a logging library instead of print statements.",
        "Consistent logs are how an agent diagnoses failures at runtime."),
    advice("observability.structured_logging", Medium,
        "Switch to structured logging (tracing-subscriber, pino, structlog, zap).",
        "Structured logs can be filtered and queried by tools an agent drives."),
    advice("observability.error_tracking", Medium,
        "Integrate an error tracker such as Sentry.",
        "Error tracking turns production failures into concrete, reproducible tasks."),
    advice("observability.metrics_tracing", High,
        "Instrument the service with OpenTelemetry or Prometheus metrics.",
        "Metrics and traces let agents verify the runtime impact of a change."),
    // task_discovery
    advice("task_discovery.issue_templates", Low,
        "Add issue templates for bugs and feature requests.",
        "Templates make issues consistent enough for an agent to act on."),
    advice("task_discovery.pr_template", Low,
        "Add a pull request template with a checklist.",
        "A template makes agents describe and verify their changes the same way humans do."),
    advice("task_discovery.roadmap", Low,
        "Keep a ROADMAP.md or BACKLOG.md in the repository.",
        "A written backlog lets agents find the next useful task on their own."),
    advice("task_discovery.labels", Low,
        "Define issue labels as code (labels.yml) and sync them.",
        "Stable labels let agents filter for work that is ready to pick up."),
    advice("task_discovery.backlog_quality", Medium,
        "Require acceptance criteria and reproduction steps in issue templates.",
        "Agents finish well-specified tasks and flounder on vague ones."),
    // code_quality
    advice("code_quality.license", Low,
        "Add a LICENSE file.",
        "A license tells agents which code they may copy in and out of the project."),
    advice("code_quality.editorconfig", Low,
        "Add an .editorconfig for indentation, line endings and charset.",
        "Editor settings keep agent-written files consistent across tools."),
    advice("code_quality.gitattributes", Low,
        "Add a .gitattributes that normalizes line endings and marks generated files.",
        "Marking generated files keeps them out of agent diffs and reviews."),
    advice("code_quality.complexity_limits", Medium,
        "Configure complexity limits in your linter (max-complexity, cognitive complexity).",
        "Limits push agents toward small functions instead of growing existing ones."),
    advice("code_quality.unused_code_detection", Medium,
        "Run an unused-code detector (knip, vulture, cargo-machete) in CI.",
        "Dead code misleads agents into extending paths that never run."),
];

pub fn lookup(id: &str) -> Option<&'static Advice> {
    ADVICE.iter().find(|a| a.id == id)
}

/// Generic text for criteria without a table entry
pub fn fallback(id: &str, name: &str) -> (String, String) {
    (
        format!("Make the '{}' check ({}) pass.", name, id),
        format!(
            "Criterion {} is failing and counts toward the repository's maturity level.",
            id
        ),
    )
}
