use std::path::PathBuf;

use crate::models::{PurchaseRecord, SalesByMethod};

use super::forms::{PurchaseForm, ReportForm, SaleForm};

/// Entries of the main menu, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MenuItem {
    Sales,
    Purchases,
    Balance,
    Logout,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 4] = [
        MenuItem::Sales,
        MenuItem::Purchases,
        MenuItem::Balance,
        MenuItem::Logout,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::Sales => "Sales",
            MenuItem::Purchases => "Purchases",
            MenuItem::Balance => "Balance & Reports",
            MenuItem::Logout => "Log out",
        }
    }
}

#[derive(Default)]
pub(crate) struct MenuScreen {
    pub(crate) selected: usize,
}

impl MenuScreen {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = MenuItem::ALL.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
    }

    pub(crate) fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }
}

/// Today's sale entry plus the running per-method summary.
pub(crate) struct SalesScreen {
    pub(crate) form: SaleForm,
    pub(crate) summary: SalesByMethod,
}

impl SalesScreen {
    pub(crate) fn new(summary: SalesByMethod) -> Self {
        Self {
            form: SaleForm::default(),
            summary,
        }
    }
}

/// Today's purchase entry plus the list of purchases already made today.
pub(crate) struct PurchasesScreen {
    pub(crate) form: PurchaseForm,
    pub(crate) purchases: Vec<PurchaseRecord>,
}

impl PurchasesScreen {
    pub(crate) fn new(purchases: Vec<PurchaseRecord>) -> Self {
        Self {
            form: PurchaseForm::default(),
            purchases,
        }
    }
}

/// Report selection and export. The generated report itself lives on the
/// session so it survives leaving and re-entering this screen.
#[derive(Default)]
pub(crate) struct BalanceScreen {
    pub(crate) form: ReportForm,
    pub(crate) last_export: Option<PathBuf>,
}
