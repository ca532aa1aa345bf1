use itertools::Itertools;
use std::collections::HashMap;

use crate::error::{CustomError, Result};

/// Largest population a `PersonSet` can index while still leaving room for `1 << n`.
pub const MAX_PEOPLE: usize = 63;

/// A set of people, one bit per index in `Family::people`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PersonSet(u64);

impl PersonSet {
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Every index below `n_people`.
    pub fn full(n_people: usize) -> Self {
        Self((1u64 << n_people) - 1)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, idx: usize) -> bool {
        self.0 & (1u64 << idx) != 0
    }

    pub fn insert(&mut self, idx: usize) {
        self.0 |= 1u64 << idx;
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// All subsets of `self`, starting with `self` and ending with the empty set.
    pub fn subsets(self) -> Subsets {
        Subsets {
            universe: self.0,
            next: Some(self.0),
        }
    }
}

pub struct Subsets {
    universe: u64,
    next: Option<u64>,
}

impl Iterator for Subsets {
    type Item = PersonSet;

    fn next(&mut self) -> Option<PersonSet> {
        let current = self.next?;
        self.next = if current == 0 {
            None
        } else {
            Some((current - 1) & self.universe)
        };
        Some(PersonSet::from_bits(current))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    /// Observed trait status, `None` when unknown.
    pub has_trait: Option<bool>,
}

/// Known trait observations as bitsets over person indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evidence {
    pub known: PersonSet,
    pub known_true: PersonSet,
}

impl Evidence {
    /// Whether a trait hypothesis agrees with every observation.
    pub fn admits(&self, have_trait: PersonSet) -> bool {
        have_trait.intersection(self.known) == self.known_true
    }
}

/// People in input order, with parent links resolved to indices.
#[derive(Debug, Clone)]
pub struct Family {
    people: Vec<Person>,
    parents: Vec<Option<(usize, usize)>>,
    evidence: Evidence,
}

impl Family {
    pub fn new(people: Vec<Person>) -> Result<Self> {
        if people.is_empty() {
            return Err(CustomError::EmptyFamily);
        }
        if people.len() > MAX_PEOPLE {
            return Err(CustomError::TooManyPeople {
                n_people: people.len(),
                max: MAX_PEOPLE,
            });
        }
        if let Some(name) = people.iter().map(|p| p.name.as_str()).duplicates().next() {
            return Err(CustomError::DuplicateName {
                name: name.to_string(),
            });
        }

        let lookup: HashMap<&str, usize> = people
            .iter()
            .enumerate()
            .map(|(idx, person)| (person.name.as_str(), idx))
            .collect();
        let resolve = |person: &Person, parent: &str| -> Result<usize> {
            if parent == person.name {
                return Err(CustomError::SelfParent {
                    name: person.name.clone(),
                });
            }
            lookup
                .get(parent)
                .copied()
                .ok_or_else(|| CustomError::UnknownParent {
                    name: person.name.clone(),
                    parent: parent.to_string(),
                })
        };

        let mut parents = Vec::with_capacity(people.len());
        let mut evidence = Evidence::default();
        for (idx, person) in people.iter().enumerate() {
            let links = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => {
                    Some((resolve(person, mother)?, resolve(person, father)?))
                }
                _ => {
                    return Err(CustomError::HalfParents {
                        name: person.name.clone(),
                    });
                }
            };
            parents.push(links);

            if let Some(has_trait) = person.has_trait {
                evidence.known.insert(idx);
                if has_trait {
                    evidence.known_true.insert(idx);
                }
            }
        }

        check_acyclic(&people, &parents)?;
        Ok(Self {
            people,
            parents,
            evidence,
        })
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn n_people(&self) -> usize {
        self.people.len()
    }

    /// Indices of (mother, father), if the person has parents listed.
    pub fn parents(&self, idx: usize) -> Option<(usize, usize)> {
        self.parents[idx]
    }

    pub fn evidence(&self) -> Evidence {
        self.evidence
    }

    pub fn everyone(&self) -> PersonSet {
        PersonSet::full(self.n_people())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    InProgress,
    Done,
}

// Depth-first walk up the parent links; meeting an in-progress node means a cycle.
fn check_acyclic(people: &[Person], parents: &[Option<(usize, usize)>]) -> Result<()> {
    let mut state = vec![Visit::Unseen; people.len()];
    for start in 0..people.len() {
        if state[start] != Visit::Unseen {
            continue;
        }
        let mut stack = vec![(start, 0usize)];
        state[start] = Visit::InProgress;
        while let Some(&(idx, next_parent)) = stack.last() {
            let parent = parents[idx].and_then(|(m, f)| [m, f].get(next_parent).copied());
            match parent {
                Some(parent) => {
                    let top = stack.len() - 1;
                    stack[top].1 += 1;
                    match state[parent] {
                        Visit::InProgress => {
                            return Err(CustomError::ParentCycle {
                                name: people[parent].name.clone(),
                            });
                        }
                        Visit::Unseen => {
                            state[parent] = Visit::InProgress;
                            stack.push((parent, 0));
                        }
                        Visit::Done => {}
                    }
                }
                None => {
                    state[idx] = Visit::Done;
                    stack.pop();
                }
            }
        }
    }
    Ok(())
}
