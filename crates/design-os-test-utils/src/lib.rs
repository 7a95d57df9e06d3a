//! Testing utilities for Design OS workspace
//!
//! Shared fixtures and a populated sample project.

#![allow(missing_docs)]

use design_os_loader::{InMemoryCorpus, ProductLoader, StaticRegistry};
use serde_json::{json, Value};

pub const OVERVIEW_MD: &str = "# InvoiceFlow

## Description
Invoicing for small agencies.

## Problems & Solutions

### Problem 1: Late payments
Automatic reminders on overdue invoices.

### Problem 2: Scattered client data
One place for every client and their billing history.

## Key Features
- Invoice builder
- Payment reminders
- Client directory
";

pub const ROADMAP_MD: &str = "# Product Roadmap

## Sections

### 2. Clients
Client directory and history.

### 1. Invoices
Create, send and track invoices.

### 3. Reports & Analytics
Revenue over time.
";

pub const DATA_MODEL_MD: &str = "# Data Model

## Entities

### Invoice
A bill sent to a client.

### Client
A company that receives invoices.

## Relationships
- Client has many Invoice
- Invoice belongs to Client
";

pub const COLORS_JSON: &str = r#"{"primary": "lime", "secondary": "teal", "neutral": "stone"}"#;

pub const TYPOGRAPHY_JSON: &str = r#"{"heading": "DM Sans", "body": "DM Sans"}"#;

pub const SHELL_SPEC_MD: &str = r#"# Application Shell

## Overview
Sidebar navigation with a workspace switcher.

## Navigation Structure
- Invoices → invoices
- Clients → clients

## Layout Pattern
variant: sidebar

## Context Selector
type: workspace
label: "Switch workspace"
items:
  - { id: "ws-1", name: "Studio", icon: "brush" }

## Breadcrumbs
mode: manual
default:
  - { label: "Home", href: "/" }
sections:
  invoices:
    - { label: "Billing", href: "/billing" }
    - { label: "Invoices", href: "/sections/invoices" }

## Header Actions
- { id: "notifications", icon: "bell", badge: 3 }
"#;

pub const INVOICES_SPEC_MD: &str = "# Invoices

## Overview
Create and track invoices.

## User Flows
- Create an invoice
- Send an invoice

## UI Requirements
- Status badge per invoice
";

pub const CLIENTS_SPEC_MD: &str = "# Clients

## Overview
Directory of clients.

## User Flows
- Browse clients

## UI Requirements
- Searchable table

## Configuration
- shell: false
";

pub fn invoices_data() -> Value {
    json!({
        "_meta": {
            "models": {"invoice": "A bill sent to a client"},
            "relationships": ["Invoice belongs to Client"]
        },
        "invoices": [
            {"id": "inv-1", "total": 1200, "status": "paid"},
            {"id": "inv-2", "total": 450, "status": "overdue"}
        ]
    })
}

pub fn clients_data() -> Value {
    json!({
        "_meta": {
            "models": {"client": "A company", "contact": "A person at a client"},
            "relationships": []
        },
        "clients": [{"id": "c-1", "name": "Acme"}]
    })
}

/// Corpus of a fully authored sample project
///
/// `reports-and-analytics` is on the roadmap but has no artifacts.
pub fn sample_corpus() -> InMemoryCorpus {
    InMemoryCorpus::new()
        .with_file("product/product-overview.md", OVERVIEW_MD)
        .with_file("product/product-roadmap.md", ROADMAP_MD)
        .with_file("product/data-model/data-model.md", DATA_MODEL_MD)
        .with_file("product/design-system/colors.json", COLORS_JSON)
        .with_file("product/design-system/typography.json", TYPOGRAPHY_JSON)
        .with_file("product/shell/spec.md", SHELL_SPEC_MD)
        .with_file("product/sections/invoices/spec.md", INVOICES_SPEC_MD)
        .with_file("product/sections/invoices/data.json", invoices_data().to_string())
        .with_file("product/sections/invoices/invoice-list.png", "")
        .with_file("product/sections/clients/spec.md", CLIENTS_SPEC_MD)
        .with_file("product/sections/clients/data.json", clients_data().to_string())
}

/// Registry of the sample project's components
pub fn sample_registry() -> StaticRegistry {
    [
        "src/sections/invoices/InvoiceList.tsx",
        "src/sections/invoices/InvoiceDetail.tsx",
        "src/sections/clients/ClientTable.tsx",
        "src/shell/components/AppShell.tsx",
        "src/shell/components/MainNav.tsx",
        "src/shell/components/UserMenu.tsx",
        "src/shell/ShellPreview.tsx",
    ]
    .into_iter()
    .collect()
}

pub fn sample_loader() -> ProductLoader<InMemoryCorpus, StaticRegistry> {
    ProductLoader::new(sample_corpus(), sample_registry())
}

pub fn empty_loader() -> ProductLoader<InMemoryCorpus, StaticRegistry> {
    ProductLoader::new(InMemoryCorpus::new(), StaticRegistry::new())
}
