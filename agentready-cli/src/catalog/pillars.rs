use super::{AGENT_DOCS, CI_FILES, MANIFESTS};
use crate::checks::Check;
use crate::models::Pillar;

const PYPROJECT: &[&str] = &["pyproject.toml"];
const TASK_FILES: &[&str] = &["Makefile", "makefile", "justfile", "Justfile", "Taskfile.yml"];
const LINT_CONFIGS: &[&str] = &[
    ".eslintrc*",
    "eslint.config.*",
    "biome.json",
    "biome.jsonc",
    "ruff.toml",
    ".ruff.toml",
    ".flake8",
    ".pylintrc",
    "clippy.toml",
    ".clippy.toml",
    ".golangci.yml",
    ".golangci.yaml",
    ".rubocop.yml",
];

pub(super) fn style() -> Pillar {
    Pillar::new(
        "style",
        "Style & Validation",
        "Linters, formatters and type checkers that catch mistakes before review",
        "🎨",
    )
    .criterion(
        "style.linter_config",
        "Linter configured",
        1,
        Check::Any(vec![
            Check::Glob(LINT_CONFIGS),
            Check::Pattern {
                files: PYPROJECT,
                pattern: r"^\[tool\.(ruff|pylint|flake8)\b",
            },
            Check::Pattern {
                files: CI_FILES,
                pattern: r"\b(cargo clippy|golangci-lint|eslint)\b",
            },
        ]),
    )
    .criterion(
        "style.formatter_config",
        "Formatter configured",
        1,
        Check::Any(vec![
            Check::Glob(&[
                ".prettierrc*",
                "prettier.config.*",
                "rustfmt.toml",
                ".rustfmt.toml",
                "biome.json",
                ".clang-format",
                ".gofmt",
            ]),
            Check::Pattern {
                files: PYPROJECT,
                pattern: r"^\[tool\.(black|ruff\.format|isort)\]",
            },
            Check::Pattern {
                files: CI_FILES,
                pattern: r"\b(cargo fmt|gofmt|prettier|black --check)\b",
            },
        ]),
    )
    .criterion(
        "style.type_checking",
        "Static type checking",
        2,
        Check::Any(vec![
            Check::ProjectType(&["rust", "go", "java", "dotnet", "typescript"]),
            Check::FileExists(&["mypy.ini", ".mypy.ini", "pyrightconfig.json"]),
            Check::Pattern {
                files: PYPROJECT,
                pattern: r"^\[tool\.(mypy|pyright)\]",
            },
        ]),
    )
    .criterion(
        "style.lint_in_ci",
        "Linting runs in CI",
        3,
        Check::Pattern {
            files: CI_FILES,
            pattern: r"(?i)\b(lint|clippy|eslint|ruff|golangci-lint|rubocop|flake8|pylint)\b",
        },
    )
    .criterion(
        "style.pre_commit_hooks",
        "Pre-commit hooks",
        3,
        Check::FileExists(&[
            ".pre-commit-config.yaml",
            ".husky",
            "lefthook.yml",
            ".lefthook.yml",
            ".githooks",
        ]),
    )
    .criterion(
        "style.strict_typing",
        "Strict type settings",
        4,
        Check::Any(vec![
            Check::Pattern {
                files: &["tsconfig.json"],
                pattern: r#""strict"\s*:\s*true"#,
            },
            Check::Pattern {
                files: &["pyproject.toml", "mypy.ini", ".mypy.ini", "pyrightconfig.json"],
                pattern: r#"(?m)^\s*"?(strict|typeCheckingMode)"?\s*[=:]\s*("?strict"?|true)"#,
            },
            Check::Pattern {
                files: &["Cargo.toml"],
                pattern: r"^\[(workspace\.)?lints",
            },
        ]),
    )
}

pub(super) fn build() -> Pillar {
    Pillar::new(
        "build",
        "Build System",
        "One obvious, repeatable way to build the project",
        "🔨",
    )
    .criterion("build.manifest", "Dependency manifest", 1, Check::Glob(MANIFESTS))
    .criterion(
        "build.lockfile",
        "Lockfile committed",
        2,
        Check::FileExists(&[
            "Cargo.lock",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            "bun.lockb",
            "bun.lock",
            "poetry.lock",
            "uv.lock",
            "Pipfile.lock",
            "go.sum",
            "Gemfile.lock",
            "composer.lock",
        ]),
    )
    .criterion(
        "build.task_runner",
        "Task runner",
        2,
        Check::Any(vec![
            Check::FileExists(TASK_FILES),
            Check::JsonField {
                file: "package.json",
                pointer: "/scripts/build",
            },
            Check::TomlField {
                file: "pyproject.toml",
                pointer: "/tool/poe/tasks",
            },
        ]),
    )
    .criterion("build.ci_pipeline", "CI pipeline", 3, Check::Glob(CI_FILES))
    .criterion(
        "build.ci_build_step",
        "CI builds the project",
        3,
        Check::Pattern {
            files: CI_FILES,
            pattern: r"\b(cargo (build|check)|npm run build|yarn build|pnpm (run )?build|go build|mvn|gradle|make|python -m build|docker build|dotnet build)\b",
        },
    )
    .criterion(
        "build.pinned_toolchain",
        "Pinned toolchain version",
        4,
        Check::FileExists(&[
            "rust-toolchain.toml",
            "rust-toolchain",
            ".nvmrc",
            ".node-version",
            ".python-version",
            ".tool-versions",
            ".go-version",
            ".ruby-version",
            "mise.toml",
            ".mise.toml",
            "flake.nix",
        ]),
    )
    .criterion(
        "build.release_automation",
        "Automated releases",
        5,
        Check::Any(vec![
            Check::Glob(&[
                ".github/workflows/*release*.yml",
                ".github/workflows/*release*.yaml",
                ".github/workflows/*publish*.yml",
            ]),
            Check::FileExists(&[
                ".goreleaser.yml",
                ".goreleaser.yaml",
                "release-please-config.json",
                ".releaserc",
                ".releaserc.json",
                "release.toml",
                "release-plz.toml",
                ".changeset",
            ]),
        ]),
    )
}

pub(super) fn testing() -> Pillar {
    Pillar::new(
        "testing",
        "Testing",
        "Tests an agent can run to check its own changes",
        "🧪",
    )
    .criterion(
        "testing.test_files",
        "Tests exist",
        1,
        Check::Any(vec![
            Check::Glob(&[
                "tests/**",
                "test/**",
                "spec/**",
                "**/__tests__/**",
                "**/*_test.go",
                "**/test_*.py",
                "**/*_test.py",
                "**/*.test.*",
                "**/*.spec.*",
                "**/src/test/**",
                "**/*Tests.cs",
            ]),
            Check::Pattern {
                files: &["src/**/*.rs", "crates/**/*.rs"],
                pattern: r"#\[cfg\(test\)\]",
            },
        ]),
    )
    .criterion(
        "testing.test_command",
        "Single test command",
        2,
        Check::Any(vec![
            Check::ProjectType(&["rust", "go"]),
            Check::JsonField {
                file: "package.json",
                pointer: "/scripts/test",
            },
            Check::Pattern {
                files: TASK_FILES,
                pattern: r"^test:",
            },
            Check::FileExists(&["pytest.ini", "tox.ini", "noxfile.py"]),
            Check::Pattern {
                files: PYPROJECT,
                pattern: r"^\[tool\.pytest",
            },
        ]),
    )
    .criterion(
        "testing.tests_in_ci",
        "Tests run in CI",
        3,
        Check::Pattern {
            files: CI_FILES,
            pattern: r"\b(cargo (nextest|test)|npm (run )?test|yarn test|pnpm (run )?test|pytest|go test|mvn (-B )?(test|verify)|gradle test|tox|nox|rspec|dotnet test|make test|just test)\b",
        },
    )
    .criterion(
        "testing.coverage",
        "Coverage reporting",
        4,
        Check::Any(vec![
            Check::FileExists(&[
                ".codecov.yml",
                "codecov.yml",
                ".coveragerc",
                "tarpaulin.toml",
                ".nycrc",
                ".nycrc.json",
            ]),
            Check::Pattern {
                files: CI_FILES,
                pattern: r"(?i)(codecov|coveralls|tarpaulin|llvm-cov|--coverage|pytest-cov|--cov\b|nyc\b)",
            },
            Check::Pattern {
                files: PYPROJECT,
                pattern: r"^\[tool\.coverage",
            },
        ]),
    )
    .criterion(
        "testing.integration_tests",
        "Integration or end-to-end tests",
        4,
        Check::Glob(&[
            "tests/*.rs",
            "tests/integration/**",
            "test/integration/**",
            "integration_tests/**",
            "e2e/**",
            "tests/e2e/**",
            "**/*.e2e.*",
            "**/*.e2e-spec.*",
            "cypress.config.*",
            "playwright.config.*",
        ]),
    )
    .criterion(
        "testing.test_guidance",
        "Agents told how to test",
        5,
        Check::Evaluator {
            prompt: "Do these documents tell a coding agent exactly how to run the test suite, \
                     including how to run a single test and what must pass before a change is done?",
            context_files: &[
                "AGENTS.md",
                "CLAUDE.md",
                ".github/copilot-instructions.md",
                "CONTRIBUTING.md",
                "README.md",
            ],
        },
    )
}

pub(super) fn docs() -> Pillar {
    Pillar::new(
        "docs",
        "Documentation",
        "Written context that explains what the project is and how to work on it",
        "📚",
    )
    .criterion(
        "docs.readme",
        "README",
        1,
        Check::FileExists(&["README.md", "README.rst", "README.txt", "README", "readme.md"]),
    )
    .criterion(
        "docs.agent_instructions",
        "Agent instructions file",
        2,
        Check::Glob(AGENT_DOCS),
    )
    .criterion(
        "docs.contributing",
        "Contributing guide",
        2,
        Check::FileExists(&[
            "CONTRIBUTING.md",
            ".github/CONTRIBUTING.md",
            "docs/CONTRIBUTING.md",
        ]),
    )
    .criterion(
        "docs.readme_setup",
        "README explains setup",
        3,
        Check::Pattern {
            files: &["README.md", "README.rst", "readme.md"],
            pattern: r"(?im)^(#+|=+|-+)?\s*(install|installation|getting started|setup|quick ?start|usage|development|building)\b",
        },
    )
    .criterion(
        "docs.changelog",
        "Changelog",
        3,
        Check::FileExists(&["CHANGELOG.md", "CHANGES.md", "HISTORY.md", "CHANGELOG", "NEWS.md"]),
    )
    .criterion(
        "docs.architecture",
        "Architecture notes",
        3,
        Check::Glob(&[
            "ARCHITECTURE.md",
            "DESIGN.md",
            "docs/architecture*",
            "docs/**/architecture*",
            "docs/adr/**",
            "doc/adr/**",
            "docs/decisions/**",
        ]),
    )
    .criterion(
        "docs.agent_instructions_quality",
        "Agent instructions are actionable",
        4,
        Check::Evaluator {
            prompt: "Would these instructions let a coding agent build, test and lint the project \
                     and follow its conventions without asking a human? Fail if they are generic, \
                     stale or missing concrete commands.",
            context_files: AGENT_DOCS,
        },
    )
    .criterion(
        "docs.published_docs",
        "Published documentation",
        5,
        Check::Any(vec![
            Check::FileExists(&[
                "mkdocs.yml",
                "docusaurus.config.js",
                "docusaurus.config.ts",
                "book.toml",
                "docs/book.toml",
                "docs/conf.py",
                ".readthedocs.yaml",
                ".readthedocs.yml",
                "typedoc.json",
            ]),
            Check::Pattern {
                files: &["Cargo.toml"],
                pattern: r"^documentation\s*=",
            },
        ]),
    )
}

pub(super) fn dev_env() -> Pillar {
    Pillar::new(
        "dev_env",
        "Development Environment",
        "A working environment that can be recreated from the repository alone",
        "🛠️",
    )
    .criterion("dev_env.gitignore", ".gitignore", 1, Check::FileExists(&[".gitignore"]))
    .criterion(
        "dev_env.env_example",
        "Example environment file",
        2,
        Check::FileExists(&[
            ".env.example",
            ".env.sample",
            ".env.template",
            "env.example",
            ".envrc.example",
        ]),
    )
    .criterion(
        "dev_env.containerized",
        "Container definition",
        3,
        Check::Glob(&[
            "Dockerfile",
            "**/Dockerfile",
            "Containerfile",
            "docker-compose.yml",
            "docker-compose.yaml",
            "compose.yml",
            "compose.yaml",
        ]),
    )
    .criterion(
        "dev_env.setup_script",
        "One-step setup",
        3,
        Check::Any(vec![
            Check::Glob(&[
                "scripts/setup*",
                "scripts/bootstrap*",
                "bin/setup",
                "script/setup",
                "script/bootstrap",
            ]),
            Check::Pattern {
                files: TASK_FILES,
                pattern: r"^(setup|bootstrap|install|dev|init):",
            },
        ]),
    )
    .criterion(
        "dev_env.devcontainer",
        "Reproducible dev environment",
        4,
        Check::FileExists(&[
            ".devcontainer/devcontainer.json",
            ".devcontainer.json",
            "flake.nix",
            "shell.nix",
            ".gitpod.yml",
            "devbox.json",
        ]),
    )
}

pub(super) fn security() -> Pillar {
    Pillar::new(
        "security",
        "Security",
        "Guard rails that keep secrets and vulnerable dependencies out",
        "🔒",
    )
    .criterion(
        "security.gitignore_secrets",
        "Secrets ignored by git",
        1,
        Check::Pattern {
            files: &[".gitignore"],
            pattern: r"(?m)^\s*/?(\*\*/)?\.env\b|\*\.pem\b|\*\.key\b",
        },
    )
    .criterion(
        "security.policy",
        "Security policy",
        2,
        Check::FileExists(&["SECURITY.md", ".github/SECURITY.md", "docs/SECURITY.md"]),
    )
    .criterion(
        "security.dependency_updates",
        "Automated dependency updates",
        3,
        Check::FileExists(&[
            ".github/dependabot.yml",
            ".github/dependabot.yaml",
            "renovate.json",
            "renovate.json5",
            ".renovaterc",
            ".renovaterc.json",
            ".github/renovate.json",
        ]),
    )
    .criterion(
        "security.codeowners",
        "Code owners",
        3,
        Check::FileExists(&["CODEOWNERS", ".github/CODEOWNERS", "docs/CODEOWNERS"]),
    )
    .criterion(
        "security.dependency_audit",
        "Dependency audit in CI",
        4,
        Check::Any(vec![
            Check::FileExists(&["deny.toml", ".cargo/audit.toml"]),
            Check::Pattern {
                files: CI_FILES,
                pattern: r"(?i)(cargo[- ]audit|cargo[- ]deny|npm audit|pnpm audit|yarn audit|pip-audit|safety check|govulncheck|snyk|trivy|osv-scanner|bundler-audit)",
            },
        ]),
    )
    .criterion(
        "security.secret_scanning",
        "Secret scanning",
        4,
        Check::Any(vec![
            Check::FileExists(&[".gitleaks.toml", ".secrets.baseline", ".trufflehog.yml"]),
            Check::Pattern {
                files: &[
                    ".github/workflows/*.yml",
                    ".github/workflows/*.yaml",
                    ".gitlab-ci.yml",
                    ".pre-commit-config.yaml",
                ],
                pattern: r"(?i)(gitleaks|trufflehog|detect-secrets|ggshield)",
            },
        ]),
    )
    .criterion(
        "security.static_analysis",
        "Static security analysis",
        5,
        Check::Pattern {
            files: CI_FILES,
            pattern: r"(?i)(codeql|semgrep|bandit|gosec|sonar|brakeman)",
        },
    )
}

pub(super) fn observability() -> Pillar {
    Pillar::new(
        "observability",
        "Observability",
        "Logs, errors and metrics an agent can use to debug what it changed",
        "📡",
    )
    .criterion(
        "observability.logging",
        "Logging library",
        2,
        Check::Any(vec![
            Check::Pattern {
                files: &["Cargo.toml", "crates/*/Cargo.toml"],
                pattern: r"(?m)^(tracing|log|env_logger|slog|fern)\s*=",
            },
            Check::Pattern {
                files: &["package.json"],
                pattern: r#""(winston|pino|bunyan|loglevel|consola)"\s*:"#,
            },
            Check::Pattern {
                files: &["pyproject.toml", "requirements*.txt", "setup.py", "setup.cfg"],
                pattern: r"\b(loguru|structlog)\b",
            },
            Check::Pattern {
                files: &["go.mod"],
                pattern: r"(go\.uber\.org/zap|github\.com/rs/zerolog|github\.com/sirupsen/logrus|log/slog)",
            },
            Check::Pattern {
                files: &["pom.xml", "build.gradle", "build.gradle.kts", "*.csproj"],
                pattern: r"(?i)(slf4j|logback|log4j|serilog|nlog)",
            },
        ]),
    )
    .criterion(
        "observability.structured_logging",
        "Structured logging",
        3,
        Check::Pattern {
            files: MANIFESTS,
            pattern: r#"(tracing-subscriber|slog-json|"pino"|structlog|go\.uber\.org/zap|zerolog|log/slog|logstash-logback-encoder|Serilog\.Formatting)"#,
        },
    )
    .criterion(
        "observability.error_tracking",
        "Error tracking",
        4,
        Check::Pattern {
            files: MANIFESTS,
            pattern: r"(?i)\b(sentry|bugsnag|rollbar|honeybadger|airbrake)",
        },
    )
    .criterion(
        "observability.metrics_tracing",
        "Metrics and tracing",
        5,
        Check::Pattern {
            files: MANIFESTS,
            pattern: r"(?i)(opentelemetry|prometheus|prom-client|statsd|dd-trace|datadog|micrometer)",
        },
    )
}

pub(super) fn task_discovery() -> Pillar {
    Pillar::new(
        "task_discovery",
        "Task Discovery",
        "Well-shaped work items an agent can pick up",
        "🗂️",
    )
    .criterion(
        "task_discovery.issue_templates",
        "Issue templates",
        2,
        Check::Glob(&[
            ".github/ISSUE_TEMPLATE/*",
            ".github/ISSUE_TEMPLATE.md",
            ".gitlab/issue_templates/*",
        ]),
    )
    .criterion(
        "task_discovery.pr_template",
        "Pull request template",
        2,
        Check::Glob(&[
            ".github/pull_request_template.md",
            ".github/PULL_REQUEST_TEMPLATE.md",
            ".github/PULL_REQUEST_TEMPLATE/*",
            "pull_request_template.md",
            "PULL_REQUEST_TEMPLATE.md",
            "docs/pull_request_template.md",
            ".gitlab/merge_request_templates/*",
        ]),
    )
    .criterion(
        "task_discovery.roadmap",
        "Roadmap or backlog file",
        3,
        Check::FileExists(&["ROADMAP.md", "docs/ROADMAP.md", "TODO.md", "BACKLOG.md"]),
    )
    .criterion(
        "task_discovery.labels",
        "Issue labels as code",
        4,
        Check::FileExists(&[
            ".github/labels.yml",
            ".github/labels.yaml",
            ".github/labels.json",
            ".github/labeler.yml",
        ]),
    )
    .criterion(
        "task_discovery.backlog_quality",
        "Issues are agent-ready",
        5,
        Check::Evaluator {
            prompt: "Do these templates and planning documents force issues to state acceptance \
                     criteria, reproduction steps and scope clearly enough for a coding agent to \
                     work on them unattended?",
            context_files: &[
                ".github/ISSUE_TEMPLATE/*",
                ".github/ISSUE_TEMPLATE.md",
                ".github/pull_request_template.md",
                ".github/PULL_REQUEST_TEMPLATE.md",
                "ROADMAP.md",
                "BACKLOG.md",
            ],
        },
    )
}

pub(super) fn code_quality() -> Pillar {
    Pillar::new(
        "code_quality",
        "Code Quality",
        "Repository hygiene that keeps changes small and reviewable",
        "✨",
    )
    .criterion(
        "code_quality.license",
        "License",
        1,
        Check::FileExists(&[
            "LICENSE",
            "LICENSE.md",
            "LICENSE.txt",
            "COPYING",
            "LICENSE-MIT",
            "LICENSE-APACHE",
        ]),
    )
    .criterion(
        "code_quality.editorconfig",
        "EditorConfig",
        2,
        Check::FileExists(&[".editorconfig"]),
    )
    .criterion(
        "code_quality.gitattributes",
        ".gitattributes",
        3,
        Check::FileExists(&[".gitattributes"]),
    )
    .criterion(
        "code_quality.complexity_limits",
        "Complexity limits",
        4,
        Check::Pattern {
            files: &[
                ".eslintrc*",
                "eslint.config.*",
                "pyproject.toml",
                "setup.cfg",
                ".flake8",
                "ruff.toml",
                ".ruff.toml",
                ".golangci.yml",
                ".golangci.yaml",
                "clippy.toml",
                ".clippy.toml",
            ],
            pattern: r"(?i)(complexity|max-lines|mccabe|gocyclo|gocognit|too-many-lines|too_many_lines)",
        },
    )
    .criterion(
        "code_quality.unused_code_detection",
        "Unused code detection",
        5,
        Check::Pattern {
            files: &[
                ".github/workflows/*.yml",
                ".github/workflows/*.yaml",
                ".gitlab-ci.yml",
                "package.json",
                ".pre-commit-config.yaml",
                "Makefile",
            ],
            pattern: r"(?i)\b(knip|ts-prune|vulture|deadcode|cargo[- ]udeps|cargo[- ]machete|unimport)\b",
        },
    )
}
