//! One matching pass.

use super::participant::{
    GraphBuilder, GraphLayout, GraphParticipant, StudentRequirements, SINK_NODE, SOURCE_NODE,
};
use super::translator::{AssignmentOrders, FlowTranslator};
use super::MatchingError;
use crate::flow::{FlowGraph, FlowResult, MinCostFlowSolver};
use crate::models::{Student, Teacher};

/// Everything a pass produced, for inspection.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub orders: AssignmentOrders,
    pub flow: FlowResult,
    pub layout: GraphLayout,
}

/// Matches a student cohort against teachers with min-cost max-flow.
///
/// Participants are only read; applying the orders is up to the caller.
///
/// # Example
/// ```
/// use u_course::matching::Assigner;
/// use u_course::models::{Level, Student, Teacher, TimeSlot};
///
/// let slots = TimeSlot::parse_list(&["MON1500"]).unwrap();
/// let teacher = Teacher::new("T1", 1)
///     .with_availability(slots.clone())
///     .with_level(Level::Beginner);
/// let student = Student::group("S1", Level::Beginner).with_availability(slots);
///
/// let orders = Assigner::new([&student], [&teacher], 6, 0).run().unwrap().unwrap();
/// assert_eq!(orders.assigned_flow(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Assigner<'a> {
    students: Vec<&'a Student>,
    teachers: Vec<&'a Teacher>,
    course_size: u32,
    tolerance: u32,
    solver: MinCostFlowSolver,
}

impl<'a> Assigner<'a> {
    pub fn new(
        students: impl IntoIterator<Item = &'a Student>,
        teachers: impl IntoIterator<Item = &'a Teacher>,
        course_size: u32,
        tolerance: u32,
    ) -> Self {
        Self {
            students: students.into_iter().collect(),
            teachers: teachers.into_iter().collect(),
            course_size,
            tolerance,
            solver: MinCostFlowSolver::new(),
        }
    }

    /// Runs the pass and returns its orders.
    ///
    /// `None` when there are no students or no teachers, or nothing flows.
    pub fn run(&self) -> Result<Option<AssignmentOrders>, MatchingError> {
        Ok(self.solve()?.map(|outcome| outcome.orders))
    }

    /// Runs the pass and keeps the flow and layout alongside the orders.
    pub fn solve(&self) -> Result<Option<MatchOutcome>, MatchingError> {
        if self.students.is_empty() || self.teachers.is_empty() {
            return Ok(None);
        }
        if self.course_size == 0 {
            return Err(MatchingError::ZeroCourseSize);
        }

        let (graph, layout) = self.build()?;
        tracing::debug!(
            students = self.students.len(),
            teachers = self.teachers.len(),
            slots = layout.slot_count(),
            edges = graph.edge_count(),
            tolerance = self.tolerance,
            "matching graph built"
        );

        let Some(flow) = self.solver.solve(&graph, SOURCE_NODE, SINK_NODE)?.solved() else {
            return Ok(None);
        };
        let orders = FlowTranslator::new(&layout)?.translate(&flow);
        tracing::debug!(
            orders = orders.len(),
            assigned_flow = orders.assigned_flow(),
            cost = flow.total_cost(),
            "matching pass solved"
        );

        Ok(Some(MatchOutcome {
            orders,
            flow,
            layout,
        }))
    }

    fn build(&self) -> Result<(FlowGraph, GraphLayout), MatchingError> {
        let requirements =
            StudentRequirements::collect(self.students.iter().copied(), self.tolerance);
        let mut builder = GraphBuilder::new();

        // slots must exist before students link to them
        for teacher in &self.teachers {
            teacher.build_graph_edges(&mut builder, self.course_size, &requirements)?;
        }
        for student in &self.students {
            student.build_graph_edges(&mut builder, self.course_size, &self.tolerance)?;
        }
        builder.add_overflow_sink();

        Ok(builder.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{OrderKey, SlotKey, OVERFLOW_NODE};
    use crate::models::{Level, TimeSlot};

    fn slots(items: &[&str]) -> Vec<TimeSlot> {
        TimeSlot::parse_list(items).unwrap()
    }

    fn slot(teacher: &str, level: Level, schedule: &str) -> OrderKey {
        OrderKey::Slot(SlotKey::new(teacher, level, schedule.parse().unwrap()))
    }

    fn intermediate_teacher(max_courses: u32) -> Teacher {
        Teacher::new("TC1.INT", max_courses)
            .with_availability(slots(&["MON1500", "MON1600", "TUE1600", "WED1400"]))
            .with_levels(vec![
                Level::Intermediate,
                Level::Advanced,
                Level::UpperIntermediate,
            ])
    }

    fn students(ids: &[&str], make: fn(&str) -> Student) -> Vec<Student> {
        ids.iter().map(|id| make(id)).collect()
    }

    fn group_int(id: &str) -> Student {
        Student::group(id, Level::Intermediate)
            .with_availability(slots(&["MON1500", "MON1600", "TUE1600", "WED1400"]))
    }

    fn individual_int(id: &str) -> Student {
        Student::individual(id, Level::Intermediate)
            .with_availability(slots(&["MON1500", "MON1600", "TUE1600", "WED1400"]))
    }

    #[test]
    fn test_empty_inputs_are_noop() {
        let teacher = intermediate_teacher(3);
        let student = group_int("ST4");
        let no_students: [&Student; 0] = [];
        let no_teachers: [&Teacher; 0] = [];
        assert!(Assigner::new(no_students, [&teacher], 6, 0).run().unwrap().is_none());
        assert!(Assigner::new([&student], no_teachers, 6, 0).run().unwrap().is_none());
    }

    #[test]
    fn test_zero_course_size() {
        let teacher = intermediate_teacher(3);
        let student = group_int("ST4");
        assert!(matches!(
            Assigner::new([&student], [&teacher], 0, 0).run(),
            Err(MatchingError::ZeroCourseSize)
        ));
    }

    #[test]
    fn test_group_students_fill_first_slot() {
        let teacher = intermediate_teacher(3);
        let cohort = students(&["ST4", "ST5"], group_int);
        let orders = Assigner::new(&cohort, [&teacher], 6, 0)
            .run()
            .unwrap()
            .unwrap();

        assert_eq!(orders.assigned_flow(), 2);
        assert_eq!(orders.len(), 1);
        let order = orders
            .get(&slot("TC1.INT", Level::Intermediate, "MON1500"))
            .unwrap();
        assert_eq!(order.student_ids, vec!["ST4", "ST5"]);
    }

    #[test]
    fn test_individual_students_take_separate_slots() {
        let teacher = intermediate_teacher(3);
        let cohort = students(&["ST2", "ST3"], individual_int);
        let outcome = Assigner::new(&cohort, [&teacher], 6, 0)
            .solve()
            .unwrap()
            .unwrap();

        assert_eq!(outcome.flow.total_flow(), 12);
        assert_eq!(outcome.orders.assigned_flow(), 12);
        let keys: Vec<&OrderKey> = outcome.orders.iter().map(|o| &o.key).collect();
        assert_eq!(
            keys,
            vec![
                &slot("TC1.INT", Level::Intermediate, "MON1500"),
                &slot("TC1.INT", Level::Intermediate, "MON1600"),
            ]
        );
    }

    #[test]
    fn test_teacher_budget_overflows_extra_demand() {
        let teacher = intermediate_teacher(1);
        let cohort = students(&["ST2", "ST3"], individual_int);
        let outcome = Assigner::new(&cohort, [&teacher], 6, 0)
            .solve()
            .unwrap()
            .unwrap();

        assert_eq!(outcome.orders.assigned_flow(), 6);
        assert_eq!(outcome.orders.unsolved().unwrap().student_ids, vec!["ST3"]);
        assert_eq!(outcome.flow.inflow(OVERFLOW_NODE), 6);
    }

    #[test]
    fn test_worst_priority_student_overflows() {
        let teacher = Teacher::new("TC2.PRE", 1)
            .with_availability(slots(&["THU1000"]))
            .with_level(Level::PreIntermediate);
        let mut cohort: Vec<Student> = (1..=7)
            .map(|i| {
                Student::group(format!("P{i}"), Level::PreIntermediate)
                    .with_availability(slots(&["THU1000"]))
            })
            .collect();
        cohort[3].priority = 10;

        let orders = Assigner::new(&cohort, [&teacher], 6, 0)
            .run()
            .unwrap()
            .unwrap();
        assert_eq!(orders.assigned_flow(), 6);
        assert_eq!(orders.unsolved().unwrap().student_ids, vec!["P4"]);
    }

    #[test]
    fn test_tolerance_widens_matching() {
        let teacher = Teacher::new("TC.FRI", 1)
            .with_availability(slots(&["FRI1900"]))
            .with_level(Level::Advanced);
        let student =
            Student::group("late", Level::Advanced).with_availability(slots(&["FRI2000"]));

        let strict = Assigner::new([&student], [&teacher], 6, 0)
            .run()
            .unwrap()
            .unwrap();
        assert_eq!(strict.assigned_flow(), 0);
        assert!(strict.unsolved().is_some());

        let relaxed = Assigner::new([&student], [&teacher], 6, 1)
            .run()
            .unwrap()
            .unwrap();
        assert_eq!(relaxed.assigned_flow(), 1);
        assert!(relaxed
            .get(&slot("TC.FRI", Level::Advanced, "FRI1900"))
            .is_some());
    }

    #[test]
    fn test_better_priority_teacher_wins() {
        let make = |id: &str, priority: i32| {
            Teacher::new(id, 1)
                .with_availability(slots(&["MON1500"]))
                .with_level(Level::Beginner)
                .with_priority(priority)
        };
        let worse = make("T.WORSE", 5);
        let better = make("T.BETTER", 1);
        let student = Student::group("S", Level::Beginner).with_availability(slots(&["MON1500"]));

        let orders = Assigner::new([&student], [&worse, &better], 6, 0)
            .run()
            .unwrap()
            .unwrap();
        assert!(orders
            .get(&slot("T.BETTER", Level::Beginner, "MON1500"))
            .is_some());
        assert!(orders
            .get(&slot("T.WORSE", Level::Beginner, "MON1500"))
            .is_none());
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let teacher = intermediate_teacher(3);
        let a = group_int("SAME");
        let b = group_int("SAME");
        assert!(matches!(
            Assigner::new([&a, &b], [&teacher], 6, 0).run(),
            Err(MatchingError::DuplicateParticipant(_))
        ));
    }

    #[test]
    fn test_fully_booked_teachers_leave_everyone_unsolved() {
        let teacher = Teacher::new("busy", 0)
            .with_availability(slots(&["MON1500"]))
            .with_level(Level::Intermediate);
        let student = group_int("S");
        let orders = Assigner::new([&student], [&teacher], 6, 0)
            .run()
            .unwrap()
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders.unsolved().is_some());
    }
}
