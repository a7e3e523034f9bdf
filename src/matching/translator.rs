//! Flow solution to assignment orders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::participant::{GraphLayout, NodeKind, SlotKey};
use crate::flow::FlowResult;

/// Errors raised while setting up a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The layout has no student nodes to read flow from.
    #[error("layout has no student origins")]
    NoOrigins,
}

/// Where a bucket of students was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKey {
    Slot(SlotKey),
    /// Demand that drained through the overflow node.
    Unsolved,
}

impl OrderKey {
    pub fn slot(&self) -> Option<&SlotKey> {
        match self {
            OrderKey::Slot(key) => Some(key),
            OrderKey::Unsolved => None,
        }
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, OrderKey::Unsolved)
    }
}

/// Students routed to one slot (or to overflow) in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOrder {
    pub key: OrderKey,
    /// Student IDs in the order their flow was read.
    pub student_ids: Vec<String>,
    /// Seats taken: group students count 1, individual students the course size.
    pub flow: i64,
}

/// Assignment orders of one pass, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOrders {
    orders: Vec<AssignmentOrder>,
}

impl AssignmentOrders {
    fn push(&mut self, key: OrderKey, student_id: &str, flow: i64) {
        match self.orders.iter_mut().find(|o| o.key == key) {
            Some(order) => {
                order.student_ids.push(student_id.to_string());
                order.flow += flow;
            }
            None => self.orders.push(AssignmentOrder {
                key,
                student_ids: vec![student_id.to_string()],
                flow,
            }),
        }
    }

    pub fn get(&self, key: &OrderKey) -> Option<&AssignmentOrder> {
        self.orders.iter().find(|o| o.key == *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignmentOrder> {
        self.orders.iter()
    }

    /// Orders bound to a slot.
    pub fn slot_orders(&self) -> impl Iterator<Item = (&SlotKey, &AssignmentOrder)> {
        self.orders
            .iter()
            .filter_map(|o| o.key.slot().map(|key| (key, o)))
    }

    /// The overflow bucket, if any student overflowed.
    pub fn unsolved(&self) -> Option<&AssignmentOrder> {
        self.get(&OrderKey::Unsolved)
    }

    /// Flow placed on slots.
    pub fn assigned_flow(&self) -> i64 {
        self.slot_orders().map(|(_, o)| o.flow).sum()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Orders sharing a key are combined, keeping the first position.
impl FromIterator<AssignmentOrder> for AssignmentOrders {
    fn from_iter<I: IntoIterator<Item = AssignmentOrder>>(iter: I) -> Self {
        let mut orders = Self::default();
        for order in iter {
            match orders.orders.iter_mut().find(|o| o.key == order.key) {
                Some(existing) => {
                    existing.student_ids.extend(order.student_ids);
                    existing.flow += order.flow;
                }
                None => orders.orders.push(order),
            }
        }
        orders
    }
}

impl<'a> IntoIterator for &'a AssignmentOrders {
    type Item = &'a AssignmentOrder;
    type IntoIter = std::slice::Iter<'a, AssignmentOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

/// Reads student edge flows back into assignment orders.
#[derive(Debug, Clone, Copy)]
pub struct FlowTranslator<'a> {
    layout: &'a GraphLayout,
}

impl<'a> FlowTranslator<'a> {
    pub fn new(layout: &'a GraphLayout) -> Result<Self, TranslateError> {
        if layout.student_ids().is_empty() {
            return Err(TranslateError::NoOrigins);
        }
        Ok(Self { layout })
    }

    /// Buckets every positive student edge by its destination.
    ///
    /// Does not modify `result`; translating twice gives equal orders.
    pub fn translate(&self, result: &FlowResult) -> AssignmentOrders {
        let mut orders = AssignmentOrders::default();
        for edge in result.positive_edges() {
            let Some(NodeKind::Student(student_id)) = self.layout.kind(&edge.from) else {
                continue;
            };
            let key = match self.layout.kind(&edge.to) {
                Some(NodeKind::Slot(slot)) => OrderKey::Slot(slot.clone()),
                Some(NodeKind::Overflow) => OrderKey::Unsolved,
                _ => continue,
            };
            orders.push(key, student_id, edge.flow);
        }
        orders
    }
}
