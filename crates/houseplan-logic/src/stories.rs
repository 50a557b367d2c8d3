//! Story distribution: which floor each requested room goes to.
//!
//! Living areas, kitchens and parking stay on the ground floor. Bedrooms and
//! bathrooms fill the upper floors evenly. Anything else is load-balanced onto
//! whichever floor is emptiest. No floor is ever left empty.

use crate::constants::room_types;
use crate::request::RoomRequest;

/// Rooms assigned to each story. Index `i` holds story `i + 1`.
pub type StoryAssignment = Vec<Vec<RoomRequest>>;

/// Distribute `rooms` across `stories` floors (treated as at least 1).
pub fn distribute_rooms(rooms: &[RoomRequest], stories: u32) -> StoryAssignment {
    let stories = stories.max(1) as usize;
    let mut floors: StoryAssignment = vec![Vec::new(); stories];

    let mut ground = Vec::new();
    let mut bedrooms = Vec::new();
    let mut bathrooms = Vec::new();
    let mut others = Vec::new();
    for room in rooms {
        let rt = room.room_type.as_str();
        if room_types::is_ground_floor(rt) {
            ground.push(room.clone());
        } else if room_types::is_bedroom(rt) {
            bedrooms.push(room.clone());
        } else if room_types::is_bathroom(rt) {
            bathrooms.push(room.clone());
        } else {
            others.push(room.clone());
        }
    }

    floors[0].extend(ground);

    if stories == 1 {
        floors[0].extend(bedrooms);
        floors[0].extend(bathrooms);
        floors[0].extend(others);
    } else {
        let upper = stories - 1;
        let bedrooms_per_floor = (bedrooms.len() / upper).max(1);
        let bathrooms_per_floor = (bathrooms.len() / upper).max(1);

        let mut bedrooms = bedrooms.into_iter();
        let mut bathrooms = bathrooms.into_iter();

        // Many bedrooms: keep one (with a bathroom) downstairs
        if bedrooms.len() > 2 * upper {
            floors[0].extend(bedrooms.next());
            floors[0].extend(bathrooms.next());
        }

        for floor in floors.iter_mut().skip(1) {
            floor.extend(bedrooms.by_ref().take(bedrooms_per_floor));
            floor.extend(bathrooms.by_ref().take(bathrooms_per_floor));
        }

        // Remainder pass: at most one extra of each per upper floor
        for floor in floors.iter_mut().skip(1) {
            floor.extend(bedrooms.next());
            floor.extend(bathrooms.next());
        }

        for room in bedrooms.chain(bathrooms).chain(others) {
            let target = least_loaded(&floors);
            floors[target].push(room);
        }
    }

    for (i, floor) in floors.iter_mut().enumerate() {
        if floor.is_empty() {
            log::debug!("Story {} has no rooms, adding a hallway", i + 1);
            floor.push(RoomRequest::new(room_types::HALLWAY));
        }
    }

    floors
}

/// Index of the floor with the fewest rooms; ties go to the lowest floor.
fn least_loaded(floors: &StoryAssignment) -> usize {
    floors
        .iter()
        .enumerate()
        .min_by_key(|(i, rooms)| (rooms.len(), *i))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
