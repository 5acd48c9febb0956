//! Multi-objective survivor selection: non-dominated sorting with a
//! crowding-distance tie-break (NSGA-II style) over the pooled parents and
//! offspring.

use super::pareto::dominates;
use super::plan::Candidate;

/// Retain `count` survivors from the pooled candidate set.
///
/// Candidates are ranked into successive non-dominated fronts; whole fronts
/// are admitted in rank order, and the first front that does not fit is
/// truncated by descending crowding distance so the sparse ends of the front
/// are kept over its crowded middle.
pub fn select_survivors(pool: Vec<Candidate>, count: usize) -> Vec<Candidate> {
    if pool.len() <= count {
        return pool;
    }

    let fronts = non_dominated_fronts(&pool);

    let mut keep: Vec<usize> = Vec::with_capacity(count);
    for front in fronts {
        if keep.len() + front.len() <= count {
            keep.extend(front);
            if keep.len() == count {
                break;
            }
        } else {
            let mut by_distance: Vec<(usize, f64)> = crowding_distances(&pool, &front);
            by_distance.sort_by(|a, b| b.1.total_cmp(&a.1));
            keep.extend(
                by_distance
                    .into_iter()
                    .take(count - keep.len())
                    .map(|(i, _)| i),
            );
            break;
        }
    }

    let mut selected = vec![false; pool.len()];
    for &i in &keep {
        selected[i] = true;
    }
    pool.into_iter()
        .zip(selected)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

/// Fast non-dominated sort: indices grouped into fronts, best first.
fn non_dominated_fronts(pool: &[Candidate]) -> Vec<Vec<usize>> {
    let n = pool.len();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&pool[i].objectives, &pool[j].objectives) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&pool[j].objectives, &pool[i].objectives) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(std::mem::replace(&mut current, next));
    }
    fronts
}

/// Crowding distance of each member of one front.
///
/// Boundary members per objective get infinite distance; interior members
/// accumulate the normalized gap between their neighbours.
fn crowding_distances(pool: &[Candidate], front: &[usize]) -> Vec<(usize, f64)> {
    let mut distance = vec![0.0f64; front.len()];
    let objective_count = pool[front[0]].objectives.len();

    for m in 0..objective_count {
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| pool[front[a]].objectives[m].total_cmp(&pool[front[b]].objectives[m]));

        let lo = pool[front[order[0]]].objectives[m];
        let hi = pool[front[*order.last().unwrap()]].objectives[m];
        distance[order[0]] = f64::INFINITY;
        distance[*order.last().unwrap()] = f64::INFINITY;

        let range = hi - lo;
        if range <= 0.0 {
            continue;
        }
        for w in order.windows(3) {
            let (prev, mid, next) = (w[0], w[1], w[2]);
            distance[mid] +=
                (pool[front[next]].objectives[m] - pool[front[prev]].objectives[m]) / range;
        }
    }

    front
        .iter()
        .copied()
        .zip(distance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::plan::Plan;

    fn candidate(objectives: Vec<f64>) -> Candidate {
        let aggregate = objectives.iter().sum();
        Candidate {
            plan: Plan {
                dwellings: vec![0],
            },
            densities: vec![0.0],
            violation: None,
            objectives,
            aggregate,
        }
    }

    #[test]
    fn first_front_survives_truncation() {
        let pool = vec![
            candidate(vec![1.0, 5.0]),
            candidate(vec![5.0, 1.0]),
            candidate(vec![6.0, 6.0]),
            candidate(vec![7.0, 7.0]),
        ];
        let survivors = select_survivors(pool, 2);
        assert_eq!(survivors.len(), 2);
        assert!(survivors.iter().any(|c| c.objectives == [1.0, 5.0]));
        assert!(survivors.iter().any(|c| c.objectives == [5.0, 1.0]));
    }

    #[test]
    fn pool_smaller_than_quota_is_returned_whole() {
        let pool = vec![candidate(vec![1.0, 2.0])];
        assert_eq!(select_survivors(pool, 5).len(), 1);
    }

    #[test]
    fn crowding_keeps_front_extremes() {
        // All on one front; truncating to 3 must keep both boundary points.
        let pool = vec![
            candidate(vec![0.0, 10.0]),
            candidate(vec![4.0, 6.0]),
            candidate(vec![5.0, 5.0]),
            candidate(vec![6.0, 4.0]),
            candidate(vec![10.0, 0.0]),
        ];
        let survivors = select_survivors(pool, 3);
        assert!(survivors.iter().any(|c| c.objectives == [0.0, 10.0]));
        assert!(survivors.iter().any(|c| c.objectives == [10.0, 0.0]));
    }

    #[test]
    fn ranks_dominated_candidates_behind() {
        let pool = vec![
            candidate(vec![3.0, 3.0]),
            candidate(vec![1.0, 1.0]),
            candidate(vec![2.0, 2.0]),
        ];
        let fronts = non_dominated_fronts(&pool);
        assert_eq!(fronts, vec![vec![1], vec![2], vec![0]]);
    }
}
