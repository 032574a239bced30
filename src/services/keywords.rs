/// Static keyword → repository lookup tables
///
/// Built once on first use and shared read-only by every request.
use once_cell::sync::Lazy;

use crate::models::RepositoryRef;

const SKILL_TABLE: &[(&str, &[&str])] = &[
    ("javascript", &["facebook/react", "vuejs/vue", "angular/angular", "sveltejs/svelte"]),
    ("typescript", &["microsoft/TypeScript", "facebook/react", "angular/angular"]),
    ("python", &["django/django", "pandas-dev/pandas", "fastai/fastai", "tiangolo/fastapi"]),
    ("react", &["facebook/react", "remix-run/remix", "vitejs/vite"]),
    ("node", &["nodejs/node", "expressjs/express", "nestjs/nest"]),
    ("go", &["golang/go"]),
    ("rust", &["rust-lang/rust"]),
    ("java", &["spring-projects/spring-framework"]),
    ("ml", &["tensorflow/tensorflow", "pytorch/pytorch", "huggingface/transformers"]),
    ("web", &["vercel/next.js", "nuxt/nuxt", "sveltekit/sveltekit"]),
    ("css", &["tailwindlabs/tailwindcss", "postcss/postcss"]),
    ("devops", &["kubernetes/kubernetes", "docker/docker", "helm/helm"]),
    ("testing", &["jestjs/jest", "vitest-dev/vitest", "cypress-io/cypress"]),
    ("backend", &["expressjs/express", "nestjs/nest", "fastapi/fastapi"]),
    ("frontend", &["facebook/react", "vuejs/vue", "angular/angular"]),
    ("mobile", &["facebook/react-native", "flutter/flutter"]),
    ("api", &["expressjs/express", "fastapi/fastapi", "nestjs/nest"]),
    ("database", &["prisma/prisma", "sequelize/sequelize", "typeorm/typeorm"]),
    ("cloud", &["aws/aws-cli", "google/cloud-sdk-python", "azure/azure-cli"]),
];

const INTEREST_TABLE: &[(&str, &[&str])] = &[
    ("web development", &["vercel/next.js", "facebook/react", "vuejs/vue", "tailwindlabs/tailwindcss"]),
    ("machine learning", &["tensorflow/tensorflow", "pytorch/pytorch", "scikit-learn/scikit-learn"]),
    ("data science", &["pandas-dev/pandas", "numpy/numpy", "jupyter/notebook"]),
    ("mobile", &["facebook/react-native", "flutter/flutter", "ionic-team/ionic"]),
    ("devops", &["kubernetes/kubernetes", "docker/docker", "helm/helm"]),
    ("game development", &["Unity-Technologies/Unity", "godotengine/godot"]),
    ("blockchain", &["ethereum/go-ethereum", "bitcoin/bitcoin"]),
    ("backend", &["nodejs/node", "django/django", "fastapi/fastapi"]),
    ("frontend", &["facebook/react", "vuejs/vue", "angular/angular"]),
    ("testing", &["jestjs/jest", "cypress-io/cypress", "playwright/playwright"]),
];

const DEFAULT_POOL: &[&str] = &[
    "facebook/react",
    "vercel/next.js",
    "vuejs/vue",
    "angular/angular",
    "sveltejs/svelte",
    "django/django",
    "fastapi/fastapi",
    "nodejs/node",
    "expressjs/express",
    "nestjs/nest",
    "pytorch/pytorch",
    "tensorflow/tensorflow",
    "pandas-dev/pandas",
    "scikit-learn/scikit-learn",
    "kubernetes/kubernetes",
    "docker/docker",
    "jestjs/jest",
    "vitest-dev/vitest",
    "tailwindlabs/tailwindcss",
    "typescript-eslint/typescript-eslint",
];

/// Skill keyword → repositories
pub static SKILL_REPOSITORIES: Lazy<KeywordIndex> = Lazy::new(|| KeywordIndex::from_table(SKILL_TABLE));

/// Interest keyword → repositories
pub static INTEREST_REPOSITORIES: Lazy<KeywordIndex> =
    Lazy::new(|| KeywordIndex::from_table(INTEREST_TABLE));

/// Well-maintained repositories appended to every candidate list
pub static DEFAULT_REPOSITORIES: Lazy<Vec<RepositoryRef>> =
    Lazy::new(|| DEFAULT_POOL.iter().copied().map(RepositoryRef::from).collect());

#[derive(Debug, Clone)]
pub struct KeywordEntry {
    pub keyword: String,
    pub repositories: Vec<RepositoryRef>,
}

/// Ordered keyword table; iteration order is declaration order
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<KeywordEntry>,
}

impl KeywordIndex {
    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        let entries = table
            .iter()
            .map(|(keyword, repos)| KeywordEntry {
                keyword: keyword.to_lowercase(),
                repositories: repos.iter().copied().map(RepositoryRef::from).collect(),
            })
            .collect();

        Self { entries }
    }

    /// Repositories of every keyword contained in `text`
    ///
    /// Matching is a plain case-insensitive substring test, so "golang" also
    /// hits "go" and "reactjs" hits "react".
    pub fn matches<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a RepositoryRef> + 'a {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .filter(move |entry| text.contains(entry.keyword.as_str()))
            .flat_map(|entry| entry.repositories.iter())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Interest keywords, for populating request forms
pub fn interest_keywords() -> Vec<String> {
    INTEREST_REPOSITORIES.keywords().map(str::to_string).collect()
}
