// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! The fixed 7-day training and diet plan.
//!
//! This is read-only configuration, not user data.

use crate::time_utils::parse_weekday;
use serde::Serialize;

/// The six meal slots prescribed for a day.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MealPlan {
    pub breakfast: &'static str,
    pub mid_morning: &'static str,
    pub lunch: &'static str,
    pub pre_workout: &'static str,
    pub post_workout_dinner: &'static str,
    pub optional_snack: &'static str,
}

impl MealPlan {
    pub const SLOT_COUNT: u32 = 6;
}

/// Prescribed workout and meals for one weekday.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub workout_type: &'static str,
    pub exercises: &'static [&'static str],
    pub diet: MealPlan,
}

/// Inclusive daily range for a macro target.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TargetRange {
    pub min: u32,
    pub max: u32,
}

impl TargetRange {
    pub fn midpoint(&self) -> f64 {
        f64::from(self.min + self.max) / 2.0
    }
}

/// Daily nutrition targets.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyTargets {
    /// kcal
    pub calories: TargetRange,
    /// grams
    pub protein: TargetRange,
    pub carbs: TargetRange,
    pub fat: TargetRange,
}

pub const DAILY_TARGETS: DailyTargets = DailyTargets {
    calories: TargetRange { min: 2000, max: 2200 },
    protein: TargetRange { min: 170, max: 180 },
    carbs: TargetRange { min: 180, max: 200 },
    fat: TargetRange { min: 55, max: 65 },
};

/// Monday-first weekly plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeeklyPlan {
    pub days: &'static [DayPlan; 7],
}

impl WeeklyPlan {
    pub fn get() -> Self {
        Self { days: &DAYS }
    }

    /// Plan for a weekday name (case-insensitive).
    pub fn day(&self, name: &str) -> Option<&'static DayPlan> {
        let weekday = parse_weekday(name)?;
        self.days.get(weekday.num_days_from_monday() as usize)
    }

    /// Number of prescribed exercises for a weekday, 0 for unknown names.
    pub fn planned_exercise_count(&self, name: &str) -> u32 {
        self.day(name).map(|d| d.exercises.len() as u32).unwrap_or(0)
    }

    pub fn total_exercises(&self) -> u32 {
        self.days.iter().map(|d| d.exercises.len() as u32).sum()
    }
}

static DAYS: [DayPlan; 7] = [
    DayPlan {
        day: "Monday",
        workout_type: "Push (Chest, Shoulders, Triceps + Core)",
        exercises: &[
            "Barbell Bench Press (4x6-8)",
            "Incline Dumbbell Press (3x8-10)",
            "Overhead Barbell Press (3x8-10)",
            "Dumbbell Lateral Raises (3x12-15)",
            "Rope Triceps Pushdown (3x12-15)",
            "Plank to Shoulder Tap (3x30-40 sec)",
            "Hanging Knee Raises (3x12-15)",
        ],
        diet: MealPlan {
            breakfast: "3 egg whites + 1 whole egg bhurji, 2 chapatis, salad",
            mid_morning: "Curd + flaxseed, roasted chana",
            lunch: "Chicken/paneer bhurji, 2 chapatis, mixed sabji, salad",
            pre_workout: "Banana + bread + PB",
            post_workout_dinner: "Whey + fish/chicken/soya curry, 2 chapatis, spinach",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Tuesday",
        workout_type: "Pull (Back, Biceps + Core)",
        exercises: &[
            "Pull-Ups (4x6-8)",
            "Barbell Bent-Over Rows (4x8-10)",
            "Seated Cable Rows (3x10-12)",
            "Face Pulls (3x12-15)",
            "Barbell Bicep Curl (3x8-10)",
            "Cable Woodchoppers (3x12-15 each side)",
            "Mountain Climbers (3x30 sec)",
        ],
        diet: MealPlan {
            breakfast: "Veg omelette (3 egg whites + 1 whole egg), 2 chapatis, salad",
            mid_morning: "Curd + roasted chana",
            lunch: "Chicken curry / rajma, 2 chapatis, green sabji",
            pre_workout: "Banana + bread + PB",
            post_workout_dinner: "Whey + chicken/paneer, 2 chapatis, spinach sabji",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Wednesday",
        workout_type: "Legs & Core",
        exercises: &[
            "Barbell Back Squats (4x6-8)",
            "Romanian Deadlift (3x8-10)",
            "Walking Lunges (3x12-14 each leg)",
            "Leg Press (3x10-12)",
            "Hanging Leg Raises (3x12-15)",
            "Side Plank Hip Lifts (3x12-15 each side)",
        ],
        diet: MealPlan {
            breakfast: "Eggs (3 whites + 1 whole), 2 chapatis, spinach sabji",
            mid_morning: "Curd + flaxseed",
            lunch: "Fish / soya curry, 2 chapatis, cabbage sabji",
            pre_workout: "Banana + bread + PB",
            post_workout_dinner: "Whey + chicken/paneer curry, 2 chapatis, bottle gourd sabji",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Thursday",
        workout_type: "Push + Core Conditioning",
        exercises: &[
            "Dumbbell Bench Press (4x6-8)",
            "Incline Dumbbell Press (3x8-10)",
            "Arnold Press (3x8-10)",
            "Dumbbell Lateral Raises (3x12-15)",
            "Rope Triceps Pushdown (3x12-15)",
            "Plank to Shoulder Tap (3x30-40 sec)",
            "Hanging Knee Raises (3x12-15)",
        ],
        diet: MealPlan {
            breakfast: "3 egg whites + 1 whole egg bhurji, 2 chapatis, salad",
            mid_morning: "Curd + flaxseed, roasted chana",
            lunch: "Dal curry, 2 chapatis, sabji",
            pre_workout: "Banana + bread + PB",
            post_workout_dinner: "Whey + chicken, 2 chapatis, spinach",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Friday",
        workout_type: "Pull + Legs Hybrid & Core",
        exercises: &[
            "Pull-Ups (3x6-8)",
            "Barbell Bent-Over Rows (3x8-10)",
            "Barbell Back Squats (3x6-8)",
            "Romanian Deadlift (3x8-10)",
            "Barbell Bicep Curl (3x8-10)",
            "Cable Woodchoppers (3x12-15 each side)",
            "Mountain Climbers (3x30 sec)",
        ],
        diet: MealPlan {
            breakfast: "Veg omelette (3 egg whites + 1 whole egg), 2 chapatis, salad",
            mid_morning: "Curd + roasted chana",
            lunch: "Chicken curry + sweet potato, 2 chapatis, sabji",
            pre_workout: "Banana + bread + PB",
            post_workout_dinner: "Whey + chicken/paneer, 2 chapatis, spinach sabji",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Saturday",
        workout_type: "Swimming",
        exercises: &[
            "Steady pace with sprint intervals (20-30 mins)",
            "Treading water (5-10 mins)",
        ],
        diet: MealPlan {
            breakfast: "2 egg whites + 1 whole egg, 1 chapati",
            mid_morning: "–",
            lunch: "Chicken curry / dal makhani, 2 chapatis, spinach sabji",
            pre_workout: "Whey + banana (post-swim)",
            post_workout_dinner: "Fish / paneer curry, 2 chapatis, mixed sabji",
            optional_snack: "Cottage cheese / curd",
        },
    },
    DayPlan {
        day: "Sunday",
        workout_type: "Badminton",
        exercises: &[
            "Fast-paced play (45-60 mins)",
            "Core circuit: Planks, Side Plank Hip Drops, Flutter Kicks",
        ],
        diet: MealPlan {
            breakfast: "Whey + 1 chapati + banana (pre-game)",
            mid_morning: "–",
            lunch: "Dal tadka, 2 chapatis, green beans sabji",
            pre_workout: "–",
            post_workout_dinner: "Fish / soya curry, 2 chapatis, bottle gourd sabji",
            optional_snack: "Curd + flaxseed",
        },
    },
];
