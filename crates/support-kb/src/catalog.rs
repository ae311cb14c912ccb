//! Immutable document catalog for the TechGadgets support knowledge base.
//!
//! Built once at startup, either from the compiled-in data set or from a JSON file
//! laid out as `{"faqs": [...], "troubleshooting": [...], "policies": [...]}`, and
//! shared read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::model::{Category, Document};
use kb_common::error::CommonError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    faqs: Vec<Document>,
    troubleshooting: Vec<Document>,
    policies: Vec<Document>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    faqs: Vec<Document>,
    troubleshooting: Vec<Document>,
    policies: Vec<Document>,
}

impl Catalog {
    pub fn new(
        faqs: Vec<Document>,
        troubleshooting: Vec<Document>,
        policies: Vec<Document>,
    ) -> Result<Self, CommonError> {
        let catalog = Self {
            faqs,
            troubleshooting,
            policies,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CommonError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.faqs, file.troubleshooting, file.policies)
    }

    pub fn load(path: &Path) -> Result<Self, CommonError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn documents(&self, category: Category) -> &[Document] {
        match category {
            Category::Faq => &self.faqs,
            Category::Troubleshooting => &self.troubleshooting,
            Category::Policy => &self.policies,
        }
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&Document> {
        self.documents(category)
            .iter()
            .find(|d| d.id.eq_ignore_ascii_case(id))
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.documents(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), CommonError> {
        for category in Category::ALL {
            let mut seen = HashSet::new();
            for doc in self.documents(category) {
                if doc.id.trim().is_empty() {
                    return Err(CommonError::EmptyId {
                        category: category.to_string(),
                    });
                }
                if !seen.insert(doc.id.as_str()) {
                    return Err(CommonError::DuplicateId {
                        category: category.to_string(),
                        id: doc.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The TechGadgets Inc. data set used by the support crew.
    pub fn builtin() -> Self {
        Self {
            faqs: vec![
                doc(
                    "faq1",
                    "Return Policy",
                    "Items can be returned within 30 days of purchase for a full refund. \
                     Products must be in original packaging and unused condition. \
                     Electronics with opened software are subject to a 15% restocking fee. \
                     To initiate a return, visit our website or contact customer support.",
                ),
                doc(
                    "faq2",
                    "Shipping Times",
                    "Standard shipping: 5-7 business days. Express shipping: 2-3 business days. \
                     Next-day delivery available for orders placed before 2 PM EST. \
                     International shipping: 10-14 business days. \
                     Free shipping on orders over $50.",
                ),
                doc(
                    "faq3",
                    "Warranty Coverage",
                    "All TechGadgets products include a 1-year manufacturer warranty. \
                     Extended warranties available for purchase up to 3 years. \
                     Warranty covers defects in materials and workmanship. \
                     Physical damage and water damage are not covered under standard warranty.",
                ),
                doc(
                    "faq4",
                    "Payment Methods",
                    "We accept Visa, MasterCard, American Express, and Discover. \
                     PayPal and Apple Pay are also available. \
                     Financing options through TechGadgets Credit for purchases over $200. \
                     Gift cards can be applied at checkout.",
                ),
                doc(
                    "faq5",
                    "Account Management",
                    "Create an account to track orders and save payment methods. \
                     Password reset available via email verification. \
                     Update shipping addresses in account settings. \
                     Order history available for the past 2 years.",
                ),
            ],
            troubleshooting: vec![
                doc(
                    "ts1",
                    "Device Won't Turn On",
                    "Step 1: Check if the battery is charged - connect to power for at least 30 minutes. \
                     Step 2: Try a hard reset by holding the power button for 15 seconds. \
                     Step 3: Check if the charging cable and adapter are working properly. \
                     Step 4: If still not working, the battery may need replacement - contact support.",
                ),
                doc(
                    "ts2",
                    "Bluetooth Connection Issues",
                    "Step 1: Ensure Bluetooth is enabled on both devices. \
                     Step 2: Remove the device from paired list and re-pair. \
                     Step 3: Restart both devices and try connecting again. \
                     Step 4: Check for firmware updates on both devices. \
                     Step 5: If persistent, reset network settings on your device.",
                ),
                doc(
                    "ts3",
                    "Screen Display Problems",
                    "Step 1: Adjust brightness settings in device menu. \
                     Step 2: Check for screen protector interference or damage. \
                     Step 3: Restart the device to clear display cache. \
                     Step 4: Update to latest firmware version. \
                     Step 5: If flickering persists, may indicate hardware issue - contact support.",
                ),
                doc(
                    "ts4",
                    "Battery Draining Quickly",
                    "Step 1: Check battery health in device settings. \
                     Step 2: Reduce screen brightness and disable unused features. \
                     Step 3: Close background applications. \
                     Step 4: Disable location services when not needed. \
                     Step 5: If battery health below 80%, consider replacement.",
                ),
                doc(
                    "ts5",
                    "Device Not Charging",
                    "Step 1: Inspect charging port for debris or damage. \
                     Step 2: Try a different charging cable and adapter. \
                     Step 3: Clean the charging port gently with compressed air. \
                     Step 4: Check if wireless charging works (if supported). \
                     Step 5: If none work, charging port may need repair - contact support.",
                ),
            ],
            policies: vec![
                doc(
                    "pol1",
                    "Refund Process",
                    "Refunds are processed within 5-7 business days after we receive the returned item. \
                     Original payment method will be credited. \
                     Shipping costs are non-refundable unless item was defective. \
                     Refund confirmation email sent once processed.",
                ),
                doc(
                    "pol2",
                    "Warranty Claims",
                    "To file a warranty claim: 1) Locate your proof of purchase. \
                     2) Contact support with device serial number and description of issue. \
                     3) Receive RMA number and shipping instructions. \
                     4) Ship device to our service center. \
                     5) Repair or replacement completed within 10-14 business days.",
                ),
                doc(
                    "pol3",
                    "Escalation Procedure",
                    "Issues unresolved after 48 hours are automatically escalated to senior support. \
                     Request supervisor callback by asking any support agent. \
                     Executive escalation available for issues over 7 days old. \
                     Written complaints can be sent to support@techgadgets.example.com.",
                ),
                doc(
                    "pol4",
                    "Price Match Guarantee",
                    "We match prices from authorized retailers within 14 days of purchase. \
                     Competitor must have item in stock at lower price. \
                     Does not apply to clearance, refurbished, or membership pricing. \
                     Submit price match request through customer support.",
                ),
                doc(
                    "pol5",
                    "Data Privacy Policy",
                    "Customer data is encrypted and stored securely. \
                     We do not sell personal information to third parties. \
                     Request data deletion by contacting privacy@techgadgets.example.com. \
                     Usage analytics are anonymized and used to improve service.",
                ),
            ],
        }
    }
}

fn doc(id: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
    }
}
