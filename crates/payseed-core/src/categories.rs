//! Categorical fields.
//!
//! Every categorical field is an enum with an explicit, ordered `ALL` list.
//! Generators select variants with [`from_index`](SubjectKind::from_index),
//! a pure `index % ALL.len()` lookup, so the list order is part of the
//! output contract and must not be rearranged.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Variants in selection order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_index(index: u64) -> Self {
                Self::ALL[(index % Self::ALL.len() as u64) as usize]
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Kind of party an onboarding or offboarding request is about.
    SubjectKind { Employee => "employee", Vendor => "vendor" }
}

categorical! {
    /// Onboarding request status; only `approved` requests are realized.
    RequestStatus { Pending => "pending", Approved => "approved", Rejected => "rejected" }
}

categorical! {
    PartyStatus { Active => "active" }
}

categorical! {
    PayrollRunStatus {
        Draft => "draft",
        PendingApproval => "pending_approval",
        Approved => "approved",
        Executed => "executed",
        Failed => "failed",
    }
}

categorical! {
    PayStatus { Pending => "pending", Paid => "paid", Failed => "failed", Disputed => "disputed" }
}

categorical! {
    OrderType { Goods => "goods", Services => "services", Licensing => "licensing" }
}

categorical! {
    OrderStatus { Open => "open", Fulfilled => "fulfilled", Cancelled => "cancelled" }
}

categorical! {
    InvoiceStatus {
        Draft => "draft",
        PendingApproval => "pending_approval",
        Approved => "approved",
        Paid => "paid",
        Rejected => "rejected",
    }
}

categorical! {
    /// What a payment settles.
    PaymentSubject { EmployeePay => "employee_pay", Invoice => "invoice" }
}

categorical! {
    PaymentMethod { BankTransfer => "bank_transfer", Check => "check", Wallet => "wallet" }
}

categorical! {
    PaymentStatus { Completed => "completed", Pending => "pending", Failed => "failed" }
}

categorical! {
    /// What an approval decides on.
    ApprovalSubject {
        PayrollRun => "payroll_run",
        Invoice => "invoice",
        Order => "order",
        Onboarding => "onboarding",
    }
}

categorical! {
    Decision { Approved => "approved", Rejected => "rejected", Escalated => "escalated" }
}

categorical! {
    DisputeType { Payroll => "payroll", Invoice => "invoice", Payment => "payment" }
}

categorical! {
    DisputeStatus {
        Open => "open",
        UnderReview => "under_review",
        Resolved => "resolved",
        Escalated => "escalated",
    }
}

categorical! {
    OffboardingStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Completed => "completed",
    }
}

categorical! {
    /// What an audit entry is about.
    AuditSubject {
        PayrollRun => "payroll_run",
        Invoice => "invoice",
        Payment => "payment",
        Onboarding => "onboarding",
        Offboarding => "offboarding",
    }
}

categorical! {
    AuditAction {
        Created => "created",
        Approved => "approved",
        Rejected => "rejected",
        Paid => "paid",
        Updated => "updated",
    }
}

categorical! {
    AuditRole { System => "system", Hr => "HR", Finance => "Finance" }
}
